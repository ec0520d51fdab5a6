//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the relay and health handlers
//! - Wire up middleware (CORS, tracing, request ID)
//! - Bind server to listener
//! - Forward `/proxy` requests to the efetch API

use axum::{
    body::Body,
    extract::{RawQuery, State},
    http::{HeaderMap, Method, Request},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::time::Instant;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::{ApiKey, RelayConfig};
use crate::http::health::get_health;
use crate::http::request::{record_id, MakeRequestUuidV4, RequestIdExt, X_REQUEST_ID};
use crate::http::response::relay_response;
use crate::observability::metrics;
use crate::upstream::{EfetchClient, UpstreamResult};

/// Application state injected into handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub upstream: EfetchClient,
}

/// HTTP server for the relay.
#[derive(Debug)]
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and credential.
    pub fn new(config: RelayConfig, api_key: ApiKey) -> UpstreamResult<Self> {
        let upstream = EfetchClient::new(&config.upstream, api_key)?;
        let router = Self::build_router(AppState { upstream });
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    pub fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/proxy", get(relay_handler))
            .route("/health", get(get_health))
            .with_state(state)
            .layer(build_cors_layer())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request.headers().request_id(),
                )
            }))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuidV4))
    }

    /// Run the server until the shutdown channel fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}

/// Any origin is allowed; the caller's origin is echoed back.
fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers(Any)
}

/// Relay handler.
/// Forwards `id` to efetch with the server key and returns what came back.
async fn relay_handler(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    let start_time = Instant::now();
    let request_id = headers.request_id();
    let id = record_id(query.as_deref());

    tracing::debug!(
        request_id = %request_id,
        id = ?id,
        "Relaying request"
    );

    match state.upstream.fetch(id.as_deref()).await {
        Ok(reply) => {
            let status = reply.status;
            metrics::record_relay(status.as_u16(), start_time);
            tracing::info!(
                request_id = %request_id,
                status = %status,
                elapsed_ms = start_time.elapsed().as_millis() as u64,
                "Relayed"
            );
            relay_response(reply)
        }
        Err(e) => {
            let status = e.status_code();
            metrics::record_relay(status.as_u16(), start_time);
            tracing::error!(
                request_id = %request_id,
                status = %status,
                error = %e,
                "Upstream error"
            );
            e.into_response()
        }
    }
}
