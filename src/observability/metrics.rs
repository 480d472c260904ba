//! Metrics collection and exposition.
//!
//! # Metrics
//! - `contacts_requests_total` (counter): requests by method, status
//! - `contacts_request_duration_seconds` (histogram): handling latency
//! - `contacts_connections_dropped_total` (counter): connections closed without a response
//! - `contacts_stored` (gauge): records currently in the store

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its HTTP scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a completed request.
pub fn record_request(method: &'static str, status: u16, started: Instant) {
    ::metrics::counter!(
        "contacts_requests_total",
        "method" => method,
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!("contacts_request_duration_seconds", "method" => method)
        .record(started.elapsed().as_secs_f64());
}

/// Record a connection that ended before a response could be written.
pub fn record_dropped_connection() {
    ::metrics::counter!("contacts_connections_dropped_total").increment(1);
}

/// Record the current store size.
pub fn record_store_size(count: usize) {
    ::metrics::gauge!("contacts_stored").set(count as f64);
}
