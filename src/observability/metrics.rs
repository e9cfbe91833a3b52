//! Metrics collection and exposition.
//!
//! # Metrics
//! - `facade_requests_total` (counter): requests by operation, status
//! - `facade_request_duration_seconds` (histogram): latency by operation
//! - `facade_upstream_calls_total` (counter): upstream calls by operation, outcome
//! - `facade_upstream_duration_seconds` (histogram): upstream latency by operation
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one handled facade request.
pub fn record_request(operation: &'static str, status: u16, start: Instant) {
    counter!(
        "facade_requests_total",
        "operation" => operation,
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("facade_request_duration_seconds", "operation" => operation)
        .record(start.elapsed().as_secs_f64());
}

/// Record one upstream call. `outcome` is `ok`, `empty` or `error`.
pub fn record_upstream_call(operation: &'static str, outcome: &'static str, start: Instant) {
    counter!(
        "facade_upstream_calls_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
    histogram!("facade_upstream_duration_seconds", "operation" => operation)
        .record(start.elapsed().as_secs_f64());
}
