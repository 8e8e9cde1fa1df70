//! Lenient JSON object body.
//!
//! A request without a JSON content type, or with an empty body, reads as `{}`;
//! malformed JSON and non-object values are rejected as `AppError::BadRequest`,
//! so every rejection is rendered as a JSON error body.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap},
};
use serde_json::Value;
use std::collections::HashMap;

/// Top-level fields of a JSON object body.
#[derive(Clone, Debug, Default)]
pub struct JsonObject(pub HashMap<String, Value>);

#[async_trait]
impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = has_json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        if !is_json || bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonObject::default());
        }
        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::BadRequest(format!("JSON inválido: {}", e)))?;
        match value {
            Value::Object(m) => Ok(JsonObject(m.into_iter().collect())),
            _ => Err(AppError::BadRequest("el cuerpo debe ser un objeto JSON".into())),
        }
    }
}

/// `application/json` or any `+json` media type, parameters ignored.
fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let mime = value.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}
