//! FocusGuard prediction server.
//!
//! Loads the trained pipeline once and serves it read-only to every request.
//! Exposes the router builder so integration tests and other crates can run
//! the service in-process.

pub mod api;
pub mod config;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use axum::routing::{get, post};
use focusguard_core::{Pipeline, artifact};
use tokio::net::TcpListener;
use tracing::info;

pub use api::{LIVENESS_MESSAGE, PredictRequest, PredictResponse, index_handler, predict_handler};
pub use config::ServerConfig;

/// Shared, immutable application state.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
}

impl AppState {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }

    /// Load the model artifact at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let pipeline = artifact::load(path)
            .with_context(|| format!("Failed to load model from {}", path.display()))?;
        Ok(Self::new(pipeline))
    }
}

/// Build the axum [`Router`] with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/predict", post(predict_handler))
        .with_state(state)
}

/// Serve on an already-bound listener until Ctrl-C / SIGTERM.
pub async fn serve(listener: TcpListener, state: AppState) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;
    info!(%addr, classes = ?state.pipeline.classes(), "Prediction server listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Prediction server stopped");
    Ok(())
}

/// Load the model, bind and serve with `config`.
pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let state = AppState::load(&config.model)?;

    let listen_addr = config.listen_addr();
    let listener = TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("Failed to bind {listen_addr}"))?;

    serve(listener, state).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl-C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
