//! Validation rules and persistence for students and enrollments.

mod crud;
mod validation;
pub use crud::{EnrollmentService, StudentService};
pub use validation::{parse_date, RequestValidator, APPROVED_ALLOWED_MSG};
