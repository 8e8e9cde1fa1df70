//! Student and enrollment shapes: stored rows, wire JSON and validated inputs.
//!
//! Rust field names are English; serde renames give the Spanish wire keys
//! (`nombre`, `materia`, `alumnoId`, ...). Timestamps live only in the tables.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Clone, Debug, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Student {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    #[serde(rename = "fecha_nacimiento")]
    pub birth_date: NaiveDate,
}

#[derive(Clone, Debug, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Enrollment {
    pub id: i64,
    #[serde(rename = "materia")]
    pub subject: String,
    #[serde(rename = "anio")]
    pub year: i64,
    #[serde(rename = "cuatrimestre")]
    pub term: i64,
    /// `None` only when the client explicitly sent `null`.
    #[serde(rename = "aprobada")]
    pub approved: Option<bool>,
    #[serde(rename = "alumnoId")]
    pub student_id: i64,
}

/// A student with its enrollments eagerly loaded.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudentDetail {
    #[serde(flatten)]
    pub student: Student,
    #[serde(rename = "cursadas")]
    pub enrollments: Vec<Enrollment>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub birth_date: NaiveDate,
}

/// Fields present in a PATCH body; absent fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

/// Validated enrollment fields, before the owning student is attached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnrollmentFields {
    pub subject: String,
    pub year: i64,
    pub term: i64,
    pub approved: Option<bool>,
}

impl EnrollmentFields {
    /// Attach the owning student. The owner always comes from the caller, never the body.
    pub fn for_student(self, student_id: i64) -> NewEnrollment {
        NewEnrollment {
            subject: self.subject,
            year: self.year,
            term: self.term,
            approved: self.approved,
            student_id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewEnrollment {
    pub subject: String,
    pub year: i64,
    pub term: i64,
    pub approved: Option<bool>,
    pub student_id: i64,
}
