//! Metrics collection and exposition.
//!
//! # Metrics
//! - `proxy_requests_total` (counter): forwarded requests by provider, method, status
//! - `proxy_request_duration_seconds` (histogram): time until response headers

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within the Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(provider: &str, method: &str, status: u16, start: Instant) {
    ::metrics::counter!(
        "proxy_requests_total",
        "provider" => provider.to_string(),
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    ::metrics::histogram!(
        "proxy_request_duration_seconds",
        "provider" => provider.to_string(),
        "method" => method.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}
