//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): HTTP requests by route, status
//! - `gateway_request_duration_seconds` (histogram): HTTP latency by route
//! - `gateway_errors_total` (counter): failed requests by error kind
//! - `user_service_calls_total` (counter): RPC calls by method, outcome
//! - `user_store_records` (gauge): records currently stored

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder with its own HTTP listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one completed HTTP request.
pub fn record_request(route: &str, status: u16, start: Instant) {
    let route = route.to_string();
    counter!(
        "gateway_requests_total",
        "route" => route.clone(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("gateway_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

/// Record a failed gateway request by error kind.
pub fn record_error(kind: &'static str) {
    counter!("gateway_errors_total", "kind" => kind).increment(1);
}

/// Record one RPC handler outcome.
pub fn record_rpc_call(method: &'static str, outcome: &'static str) {
    counter!("user_service_calls_total", "method" => method, "outcome" => outcome).increment(1);
}

/// Update the stored record count.
pub fn record_store_size(size: usize) {
    gauge!("user_store_records").set(size as f64);
}
