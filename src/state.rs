//! Shared application state for all routes.

use crate::error::AppError;
use crate::seed::{seed_if_empty, SeedOutcome};
use crate::settings::Settings;
use crate::store::{connect, ensure_tables};
use sqlx::SqlitePool;

/// The one store handle of the process; cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
}

impl AppState {
    /// Open the store, create tables and, if enabled, seed default data.
    ///
    /// Seeding is best effort: a failure is logged and startup continues.
    pub async fn init(settings: &Settings) -> Result<Self, AppError> {
        let pool = connect(settings).await?;
        ensure_tables(&pool).await?;
        if settings.seed_on_start {
            match seed_if_empty(&pool).await {
                Ok(SeedOutcome::Seeded { students, enrollments }) => {
                    tracing::info!(students, enrollments, "default data inserted");
                }
                Ok(SeedOutcome::Skipped) => {}
                Err(e) => tracing::warn!(error = %e, "seeding default data failed"),
            }
        }
        Ok(Self { pool })
    }
}
