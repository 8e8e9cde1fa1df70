//! Enrollment handlers: create under a student, approve, reject, delete.

use crate::error::{AppError, INTERNAL_SERVER_ERROR};
use crate::extractors::JsonObject;
use crate::handlers::{parse_id, UPDATE_FAILED};
use crate::response::{ack, id_body, IdBody};
use crate::service::{EnrollmentService, RequestValidator};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

/// POST /Alumnos/:id/Cursada. The owner is the path id; any `alumnoId` in the body is ignored.
/// The student is not required to exist.
pub async fn create(
    State(state): State<AppState>,
    Path(student_id_str): Path<String>,
    JsonObject(body): JsonObject,
) -> Result<Json<IdBody>, AppError> {
    let mut errors = Vec::new();
    let fields = match RequestValidator::enrollment(&body) {
        Ok(fields) => Some(fields),
        Err(AppError::Validation(e)) => {
            errors = e;
            None
        }
        Err(e) => return Err(e),
    };
    let student_id = parse_id(&student_id_str);
    if student_id.is_none() {
        errors.push("El campo \"alumnoId\" debe ser un número entero".to_string());
    }
    let (Some(fields), Some(student_id)) = (fields, student_id) else {
        return Err(AppError::Validation(errors));
    };
    let enrollment = fields.for_student(student_id);
    let id = EnrollmentService::create(&state.pool, &enrollment).await?;
    tracing::info!(id, student_id, "enrollment created");
    Ok(id_body(id))
}

/// PATCH /Cursada/Aprobar/:id
pub async fn approve(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<IdBody>, AppError> {
    set_approved(&state, &id_str, true).await
}

/// PATCH /Cursada/Reprobar/:id
pub async fn reject(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<IdBody>, AppError> {
    set_approved(&state, &id_str, false).await
}

async fn set_approved(state: &AppState, id_str: &str, approved: bool) -> Result<Json<IdBody>, AppError> {
    let not_found = || AppError::NotFound(format!("No se encontró la cursada con ID {}.", id_str));
    let id = parse_id(id_str).ok_or_else(not_found)?;
    let matched = EnrollmentService::set_approved(&state.pool, id, approved)
        .await
        .map_err(|e| e.into_internal(UPDATE_FAILED))?;
    if matched == 0 {
        return Err(not_found());
    }
    tracing::info!(id, approved, "enrollment status changed");
    Ok(id_body(id))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<&'static str>, AppError> {
    let not_found = || AppError::NotFound("Cursada no encontrada".into());
    let id = parse_id(&id_str).ok_or_else(not_found)?;
    EnrollmentService::read(&state.pool, id)
        .await
        .map_err(|e| e.into_internal(INTERNAL_SERVER_ERROR))?
        .ok_or_else(not_found)?;
    EnrollmentService::delete(&state.pool, id)
        .await
        .map_err(|e| e.into_internal(INTERNAL_SERVER_ERROR))?;
    tracing::info!(id, "enrollment deleted");
    Ok(ack())
}
