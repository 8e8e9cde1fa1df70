//! Field rules for students and enrollments.
//!
//! Every rule of an entity is checked and all violations are returned together,
//! in the fixed order the fields are listed below.

use crate::error::AppError;
use crate::model::{EnrollmentFields, NewStudent, StudentPatch};
use chrono::{DateTime, NaiveDate};
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;

pub const APPROVED_ALLOWED_MSG: &str = "El campo \"aprobada\" debe ser una de las siguientes opciones: 1 / true (=verdadero) ó 0 / false (=falso)";

const YEAR_RANGE: (i64, i64) = (1, 2100);
const TERM_RANGE: (i64, i64) = (1, 2);

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a full student body (create).
    pub fn student(body: &HashMap<String, Value>) -> Result<NewStudent, AppError> {
        let mut errors = Vec::new();
        let name = required_text(body, "nombre", &mut errors);
        let email = required_email(body, "email", &mut errors);
        let birth_date = required_date(body, "fecha_nacimiento", &mut errors);
        match (name, email, birth_date) {
            (Some(name), Some(email), Some(birth_date)) if errors.is_empty() => Ok(NewStudent {
                name,
                email,
                birth_date,
            }),
            _ => Err(AppError::Validation(errors)),
        }
    }

    /// Validate only the student fields present in body (PATCH). Unknown keys are ignored.
    pub fn student_patch(body: &HashMap<String, Value>) -> Result<StudentPatch, AppError> {
        let mut errors = Vec::new();
        let mut patch = StudentPatch::default();
        if body.contains_key("nombre") {
            patch.name = required_text(body, "nombre", &mut errors);
        }
        if body.contains_key("email") {
            patch.email = required_email(body, "email", &mut errors);
        }
        if body.contains_key("fecha_nacimiento") {
            patch.birth_date = required_date(body, "fecha_nacimiento", &mut errors);
        }
        if errors.is_empty() {
            Ok(patch)
        } else {
            Err(AppError::Validation(errors))
        }
    }

    /// Validate an enrollment body. `alumnoId` is not read from the body.
    pub fn enrollment(body: &HashMap<String, Value>) -> Result<EnrollmentFields, AppError> {
        let mut errors = Vec::new();
        let subject = required_text(body, "materia", &mut errors);
        let year = required_int_in(body, "anio", YEAR_RANGE, &mut errors);
        let term = required_int_in(body, "cuatrimestre", TERM_RANGE, &mut errors);
        let approved = approved_flag(body.get("aprobada"), &mut errors);
        match (subject, year, term) {
            (Some(subject), Some(year), Some(term)) if errors.is_empty() => Ok(EnrollmentFields {
                subject,
                year,
                term,
                approved,
            }),
            _ => Err(AppError::Validation(errors)),
        }
    }
}

fn null_msg(field: &str) -> String {
    format!("El campo \"{}\" no puede ser nulo", field)
}

fn empty_msg(field: &str) -> String {
    format!("El campo \"{}\" no puede estar vacío", field)
}

fn required_text(body: &HashMap<String, Value>, field: &str, errors: &mut Vec<String>) -> Option<String> {
    match body.get(field) {
        None | Some(Value::Null) => {
            errors.push(null_msg(field));
            None
        }
        Some(Value::String(s)) if s.trim().is_empty() => {
            errors.push(empty_msg(field));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(format!("El campo \"{}\" debe ser un texto", field));
            None
        }
    }
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@.]+$").expect("static email pattern"))
}

fn required_email(body: &HashMap<String, Value>, field: &str, errors: &mut Vec<String>) -> Option<String> {
    match body.get(field) {
        None | Some(Value::Null) => {
            errors.push(null_msg(field));
            None
        }
        Some(Value::String(s)) if email_regex().is_match(s.trim()) => Some(s.trim().to_string()),
        Some(_) => {
            errors.push(format!("El campo \"{}\" debe ser un email válido", field));
            None
        }
    }
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp (date part kept).
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|d| d.date_naive()))
}

fn required_date(body: &HashMap<String, Value>, field: &str, errors: &mut Vec<String>) -> Option<NaiveDate> {
    match body.get(field) {
        None | Some(Value::Null) => {
            errors.push(null_msg(field));
            None
        }
        Some(Value::String(s)) if s.trim().is_empty() => {
            errors.push(empty_msg(field));
            None
        }
        Some(v) => {
            let date = match v {
                Value::String(s) => parse_date(s),
                // Milliseconds since the Unix epoch.
                Value::Number(n) => n
                    .as_i64()
                    .and_then(DateTime::from_timestamp_millis)
                    .map(|d| d.date_naive()),
                _ => None,
            };
            if date.is_none() {
                errors.push(format!("El campo \"{}\" debe ser una fecha válida", field));
            }
            date
        }
    }
}

/// Integer from a JSON number or a numeric string.
fn as_integer(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn required_int_in(
    body: &HashMap<String, Value>,
    field: &str,
    (min, max): (i64, i64),
    errors: &mut Vec<String>,
) -> Option<i64> {
    let v = match body.get(field) {
        None | Some(Value::Null) => {
            errors.push(null_msg(field));
            return None;
        }
        Some(Value::String(s)) if s.trim().is_empty() => {
            errors.push(empty_msg(field));
            return None;
        }
        Some(v) => v,
    };
    let Some(n) = as_integer(v) else {
        errors.push(format!("El campo \"{}\" debe ser un número entero", field));
        return None;
    };
    if n < min || n > max {
        errors.push(format!("El campo \"{}\" debe estar entre {} y {}", field, min, max));
        return None;
    }
    Some(n)
}

/// Missing means the default (approved); explicit `null` is kept as unset.
/// The accepted set is compared by string form, so `"1"`, `"true"` and `1.0` also pass.
fn approved_flag(v: Option<&Value>, errors: &mut Vec<String>) -> Option<bool> {
    let flag = match v {
        None => return Some(true),
        Some(Value::Null) => return None,
        Some(Value::Bool(b)) => Some(*b),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) if f == 1.0 => Some(true),
            Some(f) if f == 0.0 => Some(false),
            _ => None,
        },
        Some(Value::String(s)) => match s.as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        Some(_) => None,
    };
    if flag.is_none() {
        errors.push(APPROVED_ALLOWED_MSG.to_string());
    }
    flag
}
