//! Seedport legacy API server
//!
//! Stand-in for the retired REST backend: clients now read the document
//! store directly, so this only answers the index and health routes and
//! tells everything else it is gone.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::ServerConfig;
use handlers::{create_router, AppState};
use tokio::net::TcpListener;
use tracing::info;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Start the legacy API server and run until Ctrl+C
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    info!("Starting legacy API server");

    let app = create_router(AppState::new());

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Legacy API listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    info!("Legacy API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
