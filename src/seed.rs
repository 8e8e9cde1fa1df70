//! Default rows inserted on first start against an empty store.

use crate::error::AppError;
use crate::model::NewStudent;
use crate::service::{EnrollmentService, RequestValidator, StudentService};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedOutcome {
    Seeded { students: usize, enrollments: usize },
    /// At least one table already had rows.
    Skipped,
}

fn student_fixtures(birth_date: &str) -> Vec<Value> {
    vec![
        json!({ "nombre": "Jimi Hendrix", "email": "Jimi@Hendrix.com", "fecha_nacimiento": birth_date }),
        json!({ "nombre": "Carlos Tevez", "email": "carlos@tevez.com", "fecha_nacimiento": birth_date }),
        json!({ "nombre": "Post Malone", "email": "post@malone.com", "fecha_nacimiento": birth_date }),
        json!({ "nombre": "Jimmy Kimmel", "email": "Jimmi@kimmel.com", "fecha_nacimiento": birth_date }),
    ]
}

/// One enrollment per student, in the same order as the students.
fn enrollment_fixtures() -> Vec<Value> {
    vec![
        json!({ "materia": "Historia", "anio": 1953, "cuatrimestre": 2, "aprobada": true }),
        json!({ "materia": "Matematica", "anio": 2001, "cuatrimestre": 1, "aprobada": false }),
        json!({ "materia": "Lengua", "anio": 2009, "cuatrimestre": 1, "aprobada": true }),
        json!({ "materia": "Ingles", "anio": 1998, "cuatrimestre": 2, "aprobada": false }),
    ]
}

fn to_map(v: Value) -> HashMap<String, Value> {
    match v {
        Value::Object(m) => m.into_iter().collect(),
        _ => HashMap::new(),
    }
}

/// Insert the default students and enrollments when both tables are empty.
///
/// Fixtures go through the same rules as the create endpoints. Enrollments point
/// at the ids returned by the student inserts (1..=4 on a fresh store).
pub async fn seed_if_empty(pool: &SqlitePool) -> Result<SeedOutcome, AppError> {
    let students = StudentService::count(pool).await?;
    let enrollments = EnrollmentService::count(pool).await?;
    if students != 0 || enrollments != 0 {
        tracing::debug!(students, enrollments, "store not empty; seed skipped");
        return Ok(SeedOutcome::Skipped);
    }

    let today = chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string();
    let new_students = student_fixtures(&today)
        .into_iter()
        .map(|v| RequestValidator::student(&to_map(v)))
        .collect::<Result<Vec<NewStudent>, _>>()?;
    let enrollment_fields = enrollment_fixtures()
        .into_iter()
        .map(|v| RequestValidator::enrollment(&to_map(v)))
        .collect::<Result<Vec<_>, _>>()?;

    let student_ids = StudentService::bulk_create(pool, &new_students).await?;
    let new_enrollments: Vec<_> = enrollment_fields
        .into_iter()
        .zip(student_ids.iter().copied())
        .map(|(fields, student_id)| fields.for_student(student_id))
        .collect();
    let enrollment_ids = EnrollmentService::bulk_create(pool, &new_enrollments).await?;

    tracing::debug!(ids = ?student_ids, "seeded students");
    Ok(SeedOutcome::Seeded {
        students: student_ids.len(),
        enrollments: enrollment_ids.len(),
    })
}
