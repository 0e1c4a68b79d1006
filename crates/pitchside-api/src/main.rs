//! Pitchside API Server

use pitchside_api::{create_router, state::AppState};
use pitchside_core::{telemetry::init_tracing, AppConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    init_tracing(&config.logging);

    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = Arc::new(AppState::from_config(config)?);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Pitchside API Server starting on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);
    tracing::info!("OpenAPI spec at http://{}/api-docs/openapi.json", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
