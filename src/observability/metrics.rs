//! Metrics collection and exposition.
//!
//! # Metrics
//! - `config_proxy_requests_total` (counter): proxy requests by method, status
//! - `config_proxy_request_duration_seconds` (histogram): handler latency
//! - `config_loader_fetches_total` (counter): loader fetches by outcome
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter with its own HTTP listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one config proxy request.
pub fn record_proxy_request(method: &str, status: u16, start: Instant) {
    metrics::counter!(
        "config_proxy_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("config_proxy_request_duration_seconds")
        .record(start.elapsed().as_secs_f64());
}

/// Record the outcome of one loader fetch.
pub fn record_config_fetch(outcome: &'static str) {
    metrics::counter!("config_loader_fetches_total", "outcome" => outcome).increment(1);
}
