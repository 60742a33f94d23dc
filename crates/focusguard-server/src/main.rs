//! FocusGuard Prediction Server
//!
//! Loads the trained activity classifier once at startup and serves
//! `POST /predict` for the desktop monitor, plus a `GET /` liveness check.

use clap::Parser;
use focusguard_server::ServerConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ServerConfig::parse();
    info!(
        model = %config.model.display(),
        listen_addr = %config.listen_addr(),
        "Starting FocusGuard prediction server"
    );

    focusguard_server::run(config).await
}
