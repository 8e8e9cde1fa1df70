//! HTTP handlers for students and enrollments.

pub mod enrollment;
pub mod student;

pub(crate) const QUERY_FAILED: &str = "Ha ocurrido un error al ejecutar la consulta.";
pub(crate) const UPDATE_FAILED: &str = "Ha ocurrido un error al actualizar los datos.";

/// Path ids are integers; anything else can never match a row.
pub(crate) fn parse_id(id_str: &str) -> Option<i64> {
    id_str.trim().parse().ok()
}
