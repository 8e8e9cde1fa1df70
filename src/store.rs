//! SQLite pool creation and table DDL.

use crate::error::AppError;
use crate::settings::Settings;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

pub const STUDENTS_TABLE: &str = "students";
pub const ENROLLMENTS_TABLE: &str = "enrollments";

/// Open the pool described by `settings`.
///
/// Foreign keys are declared in the DDL but not enforced: enrollments may point at
/// students that do not exist (or no longer exist).
pub async fn connect(settings: &Settings) -> Result<SqlitePool, AppError> {
    let opts = SqliteConnectOptions::from_str(&settings.database_url)?
        .create_if_missing(true)
        .foreign_keys(false);
    let mut pool_opts = SqlitePoolOptions::new().max_connections(settings.max_connections.max(1));
    if settings.is_in_memory() {
        // One connection per in-memory database; never recycle it.
        pool_opts = pool_opts
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>);
    }
    let pool = pool_opts.connect_with(opts).await?;
    tracing::debug!(url = %settings.database_url, "connected");
    Ok(pool)
}

/// Create tables if they do not exist. Safe to run on every start.
pub async fn ensure_tables(pool: &SqlitePool) -> Result<(), AppError> {
    let students_ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            birth_date TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
        STUDENTS_TABLE
    );
    sqlx::query(&students_ddl).execute(pool).await?;

    let enrollments_ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            subject TEXT NOT NULL,
            year INTEGER NOT NULL,
            term INTEGER NOT NULL,
            approved BOOLEAN DEFAULT 1,
            student_id INTEGER NOT NULL REFERENCES {}(id),
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
        ENROLLMENTS_TABLE, STUDENTS_TABLE
    );
    sqlx::query(&enrollments_ddl).execute(pool).await?;

    let index_ddl = format!(
        "CREATE INDEX IF NOT EXISTS idx_{0}_student_id ON {0} (student_id)",
        ENROLLMENTS_TABLE
    );
    sqlx::query(&index_ddl).execute(pool).await?;
    Ok(())
}
