//! Router assembly: API routes, common routes and HTTP layers.

pub mod api;
pub mod common;

pub use api::api_routes;
pub use common::common_routes_with_ready;

use crate::settings::Settings;
use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Full application router with request tracing and a body size limit.
pub fn build_router(state: AppState, settings: &Settings) -> Router {
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .merge(api_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(settings.body_limit_bytes)),
        )
}
