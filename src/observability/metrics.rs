//! Metrics collection and exposition.
//!
//! # Metrics
//! - `product_requests_total` (counter): requests by method, endpoint, status
//! - `product_request_duration_seconds` (histogram): latency by method, endpoint
//! - `product_store_size` (gauge): number of stored products

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Metric names as constants for consistency.
pub mod names {
    pub const REQUESTS_TOTAL: &str = "product_requests_total";
    pub const REQUEST_DURATION_SECONDS: &str = "product_request_duration_seconds";
    pub const STORE_SIZE: &str = "product_store_size";
}

/// Install the Prometheus exporter with its own HTTP listener.
///
/// Must be called from within a Tokio runtime. A failed install is logged and
/// the service keeps running without exported metrics.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Prometheus exporter listening"),
        Err(e) => {
            tracing::error!(address = %addr, error = %e, "Failed to install Prometheus exporter")
        }
    }
}

/// Record one handled request.
pub fn record_request(method: &str, endpoint: &str, status: u16, start: Instant) {
    counter!(
        names::REQUESTS_TOTAL,
        "method" => method.to_string(),
        "endpoint" => endpoint.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        names::REQUEST_DURATION_SECONDS,
        "method" => method.to_string(),
        "endpoint" => endpoint.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record the current number of stored products.
pub fn record_store_size(len: usize) {
    gauge!(names::STORE_SIZE).set(len as f64);
}
