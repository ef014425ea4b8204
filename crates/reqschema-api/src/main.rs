//! # reqschema-api — Binary Entry Point
//!
//! Serves the sample boxes API. Port and schema directory come from
//! `PORT` and `SCHEMA_ROOT`.

use reqschema_api::state::{AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    if !config.schema_root.is_dir() {
        tracing::warn!(
            schema_root = %config.schema_root.display(),
            "schema directory missing; every validated endpoint will answer 422"
        );
    }

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = reqschema_api::app(AppState::new(config));

    tracing::info!("reqschema API listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
