//! Leave Engine HTTP server.
//!
//! Reads the configuration directory from `LEAVE_ENGINE_CONFIG` and the
//! listen address from `LEAVE_ENGINE_ADDR`.

use std::env;

use leave_engine::api::{AppState, create_router};
use leave_engine::config::ConfigLoader;
use tracing::{error, info};

const DEFAULT_CONFIG_DIR: &str = "./config/default";
const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    let config_dir = env::var("LEAVE_ENGINE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.into());
    let addr = env::var("LEAVE_ENGINE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.into());

    let config = ConfigLoader::load(&config_dir).inspect_err(|err| {
        error!(config_dir = %config_dir, error = %err, "Failed to load configuration");
    })?;
    let state = AppState::new(config)?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(
        addr = %addr,
        config_dir = %config_dir,
        organization = %state.config().organization().name,
        max_range_days = state.config().requests().max_range_days,
        "Leave engine listening"
    );

    axum::serve(listener, create_router(state)).await?;
    Ok(())
}
