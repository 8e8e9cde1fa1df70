//! Operational routes: liveness, readiness against the student tables, build info.

use crate::error::AppError;
use crate::service::{EnrollmentService, StudentService};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

/// Readiness report. Counts are present only when both tables answered.
#[derive(Debug, Serialize)]
struct Readiness {
    status: &'static str,
    database: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    alumnos: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cursadas: Option<i64>,
}

async fn row_counts(state: &AppState) -> Result<(i64, i64), AppError> {
    let students = StudentService::count(&state.pool).await?;
    let enrollments = EnrollmentService::count(&state.pool).await?;
    Ok((students, enrollments))
}

/// 200 while both tables can be queried, 503 otherwise (store gone or tables dropped).
async fn ready(State(state): State<AppState>) -> (StatusCode, Json<Readiness>) {
    match row_counts(&state).await {
        Ok((alumnos, cursadas)) => (
            StatusCode::OK,
            Json(Readiness {
                status: "ok",
                database: "ok",
                alumnos: Some(alumnos),
                cursadas: Some(cursadas),
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "not ready");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(Readiness {
                    status: "degraded",
                    database: "unavailable",
                    alumnos: None,
                    cursadas: None,
                }),
            )
        }
    }
}

pub fn common_routes_with_ready(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({ "status": "ok" })) }))
        .route("/ready", get(ready))
        .route(
            "/version",
            get(|| async {
                Json(serde_json::json!({
                    "name": env!("CARGO_PKG_NAME"),
                    "version": env!("CARGO_PKG_VERSION")
                }))
            }),
        )
        .with_state(state)
}
