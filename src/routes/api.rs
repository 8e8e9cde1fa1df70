//! Student and enrollment routes. Paths are case-sensitive.

use crate::handlers::{enrollment, student};
use crate::state::AppState;
use axum::{
    routing::{delete, get, patch, post},
    Router,
};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/Alumnos", get(student::list).post(student::create))
        .route("/Alumnos/", post(student::create))
        .route(
            "/Alumnos/:id",
            get(student::read).patch(student::update).delete(student::delete),
        )
        .route("/Alumnos/:id/Cursada", post(enrollment::create))
        .route("/Cursada/Aprobar/:id", patch(enrollment::approve))
        .route("/Cursada/Reprobar/:id", patch(enrollment::reject))
        .route("/Cursada/:id", delete(enrollment::delete))
        .with_state(state)
}
