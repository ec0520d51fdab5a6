//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): relayed requests by status
//! - `relay_request_duration_seconds` (histogram): end-to-end latency
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint. Must run inside the tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one relayed request.
pub fn record_relay(status: u16, start: Instant) {
    ::metrics::counter!("relay_requests_total", "status" => status.to_string()).increment(1);
    ::metrics::histogram!("relay_request_duration_seconds").record(start.elapsed().as_secs_f64());
}
