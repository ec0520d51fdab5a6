//! PubMed efetch relay.
//!
//! Forwards `GET /proxy?id=...` to NCBI E-utilities with a server-held API key
//! so the key never reaches the browser.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                  RELAY                       │
//!     Client Request   │  ┌─────────┐    ┌─────────┐    ┌──────────┐  │
//!     ─────────────────┼─▶│  CORS + │───▶│ /proxy  │───▶│ upstream │──┼──▶ efetch.fcgi
//!                      │  │ req. ID │    │ handler │    │  client  │  │    (+ api_key)
//!     Client Response  │  └─────────┘    └─────────┘    └──────────┘  │
//!     ◀────────────────┼── status + body passthrough, application/xml │
//!                      │                                              │
//!                      │  config · lifecycle · observability          │
//!                      └──────────────────────────────────────────────┘
//! ```

use pubmed_relay::config::{loader, API_KEY_ENV};
use pubmed_relay::lifecycle::{self, signals, Shutdown, StartupError};
use pubmed_relay::observability::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match loader::load_from_env() {
        Ok(config) => config,
        Err(e) => {
            logging::init("info");
            let e = StartupError::from(e);
            tracing::error!(error = %e, "Startup failed");
            return Err(e.into());
        }
    };

    logging::init(&config.observability.log_level);

    tracing::info!("pubmed-relay v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        request_timeout_secs = config.upstream.request_timeout_secs,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    if let Err(e) = lifecycle::launch(config, std::env::var(API_KEY_ENV).ok(), server_shutdown).await {
        tracing::error!(error = %e, "Startup failed");
        return Err(e.into());
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
