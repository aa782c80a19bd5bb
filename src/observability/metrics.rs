//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_dispatch_total` (counter): dispatched requests by method, status
//! - `router_dispatch_duration_seconds` (histogram): dispatch latency by method
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder it is a no-op
//! - Prometheus exporter is optional and owns its own listener
//! - The `method` label is one of the routable methods or `OTHER`, so
//!   arbitrary client methods cannot mint new series

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::routing::Method;

/// Label value for the fixed set of routable methods, `OTHER` for the rest.
pub const OTHER_METHOD: &str = "OTHER";

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Bounded `method` label for a request method.
pub fn method_label(method: &axum::http::Method) -> &'static str {
    Method::from_http(method).map_or(OTHER_METHOD, |m| m.as_str())
}

/// Record one dispatched request.
pub fn record_dispatch(method: &'static str, status: u16, start: Instant) {
    ::metrics::counter!(
        "router_dispatch_total",
        "method" => method,
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!("router_dispatch_duration_seconds", "method" => method)
        .record(start.elapsed().as_secs_f64());
}
