//! Alumnos API: REST backend for students and their course enrollments.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod seed;
pub mod service;
pub mod settings;
pub mod state;
pub mod store;

pub use error::{AppError, ConfigError};
pub use model::{Enrollment, Student, StudentDetail};
pub use response::{IdBody, ACK};
pub use routes::{api_routes, build_router, common_routes_with_ready};
pub use seed::{seed_if_empty, SeedOutcome};
pub use service::{EnrollmentService, RequestValidator, StudentService};
pub use settings::Settings;
pub use state::AppState;
pub use store::{connect, ensure_tables};
