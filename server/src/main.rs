//! Alumnos API server.
//!
//! Run from repo root: `cargo run -p alumnos-server`
//! Settings come from the environment or a `.env` file (see `Settings`).

use alumnos_api::{build_router, AppState, Settings};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("alumnos_api=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let state = AppState::init(&settings).await?;
    let app = build_router(state, &settings);

    let listener = TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
