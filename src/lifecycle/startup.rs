//! Startup orchestration.
//!
//! # Responsibilities
//! - Require the API key before anything else happens
//! - Initialize the upstream client and router
//! - Start the metrics exporter when enabled
//! - Bind the listener and begin accepting traffic
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listeners start last (no socket is opened without a key)

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::config::{ApiKey, ConfigError, MissingApiKey, RelayConfig};
use crate::http::HttpServer;
use crate::observability::metrics;
use crate::upstream::UpstreamError;

/// Errors that stop the process before or while serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    MissingApiKey(#[from] MissingApiKey),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Everything that must succeed before a socket is opened.
pub fn prepare(config: RelayConfig, api_key: Option<String>) -> Result<HttpServer, StartupError> {
    let api_key = ApiKey::from_value(api_key)?;
    Ok(HttpServer::new(config, api_key)?)
}

/// Validate, bind and serve until `shutdown` fires.
pub async fn launch(
    config: RelayConfig,
    api_key: Option<String>,
    shutdown: broadcast::Receiver<()>,
) -> Result<(), StartupError> {
    let server = prepare(config, api_key)?;
    let observability = &server.config().observability;

    if observability.metrics_enabled {
        match observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let bind_address = server.config().listener.bind_address.clone();
    let listener = TcpListener::bind(&bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            addr: bind_address.clone(),
            source,
        })?;

    tracing::info!(
        address = %listener.local_addr().map_err(StartupError::Serve)?,
        "Listening for connections"
    );

    server.run(listener, shutdown).await.map_err(StartupError::Serve)
}
