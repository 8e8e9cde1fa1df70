//! Student handlers: list, read (with enrollments), create, partial update, delete.

use crate::error::{AppError, INTERNAL_SERVER_ERROR};
use crate::extractors::JsonObject;
use crate::handlers::{parse_id, QUERY_FAILED, UPDATE_FAILED};
use crate::model::{Student, StudentDetail};
use crate::response::{ack, id_body, IdBody};
use crate::service::{RequestValidator, StudentService};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Student>>, AppError> {
    let rows = StudentService::list(&state.pool).await?;
    Ok(Json(rows))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<StudentDetail>, AppError> {
    let not_found = || AppError::NotFound(format!("No se encontró al Alumno con ID {}.", id_str));
    let id = parse_id(&id_str).ok_or_else(not_found)?;
    let detail = StudentService::read_with_enrollments(&state.pool, id)
        .await
        .map_err(|e| e.into_internal(QUERY_FAILED))?
        .ok_or_else(not_found)?;
    Ok(Json(detail))
}

pub async fn create(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<Json<IdBody>, AppError> {
    let student = RequestValidator::student(&body)?;
    let id = StudentService::create(&state.pool, &student).await?;
    tracing::info!(id, "student created");
    Ok(id_body(id))
}

/// Validation failures here are reported like store failures (500), not 409.
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    JsonObject(body): JsonObject,
) -> Result<Json<IdBody>, AppError> {
    let not_found = || AppError::NotFound(format!("No se encontró el Alumno con ID {}.", id_str));
    let id = parse_id(&id_str).ok_or_else(not_found)?;
    let patch = RequestValidator::student_patch(&body).map_err(|e| e.into_internal(UPDATE_FAILED))?;
    let matched = StudentService::update(&state.pool, id, &patch)
        .await
        .map_err(|e| e.into_internal(UPDATE_FAILED))?;
    if matched == 0 {
        return Err(not_found());
    }
    Ok(id_body(id))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<&'static str>, AppError> {
    let not_found = || AppError::NotFound("Alumno no encontrado".into());
    let id = parse_id(&id_str).ok_or_else(not_found)?;
    StudentService::read(&state.pool, id)
        .await
        .map_err(|e| e.into_internal(INTERNAL_SERVER_ERROR))?
        .ok_or_else(not_found)?;
    StudentService::delete(&state.pool, id)
        .await
        .map_err(|e| e.into_internal(INTERNAL_SERVER_ERROR))?;
    tracing::info!(id, "student deleted");
    Ok(ack())
}
