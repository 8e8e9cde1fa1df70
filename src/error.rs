//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Generic message for store failures that have no handler-specific wording.
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    /// Field rule violations, in rule order. Rendered as 409 `{"errores": [...]}`.
    #[error("validation: {}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("not found: {0}")]
    NotFound(String),
    /// Failure hidden behind a fixed client-facing message; `source` is only logged.
    #[error("{message}: {source}")]
    Internal {
        message: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Collapse validation and store failures into INTERNAL with the given client message.
    /// NOT_FOUND and BAD_REQUEST pass through unchanged.
    pub fn into_internal(self, message: &'static str) -> AppError {
        match self {
            AppError::NotFound(_) | AppError::BadRequest(_) | AppError::Internal { .. } => self,
            other => AppError::Internal {
                message,
                source: Box::new(other),
            },
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Serialize)]
pub struct ValidationBody {
    pub errores: Vec<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errores) => {
                tracing::warn!(errores = ?errores, "validation failed");
                (StatusCode::CONFLICT, Json(ValidationBody { errores })).into_response()
            }
            AppError::NotFound(message) => {
                tracing::warn!(%message, "not found");
                (StatusCode::NOT_FOUND, Json(ErrorBody { error: message })).into_response()
            }
            AppError::BadRequest(message) => {
                tracing::warn!(%message, "bad request");
                (StatusCode::BAD_REQUEST, Json(ErrorBody { error: message })).into_response()
            }
            AppError::Internal { message, source } => {
                tracing::error!(error = %source, "{}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        error: message.to_string(),
                    }),
                )
                    .into_response()
            }
            AppError::Db(e) => {
                tracing::error!(error = %e, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        error: INTERNAL_SERVER_ERROR.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_internal_keeps_not_found() {
        let err = AppError::NotFound("x".into()).into_internal("boom");
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn into_internal_wraps_validation() {
        let err = AppError::Validation(vec!["bad".into()]).into_internal("boom");
        match err {
            AppError::Internal { message, source } => {
                assert_eq!(message, "boom");
                assert!(source.to_string().contains("bad"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn bad_request_maps_to_json_400() {
        let resp = AppError::BadRequest("JSON inválido".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            resp.headers().get(axum::http::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn validation_maps_to_conflict() {
        let resp = AppError::Validation(vec!["a".into()]).into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }
}
