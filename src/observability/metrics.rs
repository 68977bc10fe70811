//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define probe metrics (latency, failures, per-address health)
//! - Render Prometheus text exposition to a file at the end of a run
//!
//! # Metrics
//! - `probe_round_trip_seconds` (histogram): per-probe latency by proxy
//! - `probe_failures_total` (counter): failed probes by proxy
//! - `probe_unresolved_partitions_total` (counter): resolution failures
//! - `probe_address_latency_ms` (gauge): average latency by address, role
//! - `probe_address_status` (gauge): 0=normal, 1=slow, 2=down, 3=unknown
//!
//! # Design Decisions
//! - Without an installed recorder every call is a no-op
//! - A run-once process has nothing to scrape, so the exposition goes to a
//!   textfile for a node exporter to pick up

use std::path::Path;
use std::time::Duration;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

use crate::health::{HealthEntry, HealthStatus};

/// Install the Prometheus recorder and return a handle for rendering.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Write the current exposition to `path`.
pub fn write_textfile(handle: &PrometheusHandle, path: &Path) -> std::io::Result<()> {
    std::fs::write(path, handle.render())
}

pub fn record_probe(proxy: &str, latency: Duration) {
    metrics::histogram!("probe_round_trip_seconds", "proxy" => proxy.to_string())
        .record(latency.as_secs_f64());
}

pub fn record_probe_failure(proxy: &str) {
    metrics::counter!("probe_failures_total", "proxy" => proxy.to_string()).increment(1);
}

pub fn record_unresolved_partition() {
    metrics::counter!("probe_unresolved_partitions_total").increment(1);
}

pub fn record_address_health(entry: &HealthEntry) {
    let role = entry.role.to_string();
    if let Some(avg) = entry.average_ms {
        metrics::gauge!(
            "probe_address_latency_ms",
            "address" => entry.address.clone(),
            "role" => role.clone()
        )
        .set(avg);
    }
    metrics::gauge!(
        "probe_address_status",
        "address" => entry.address.clone(),
        "role" => role
    )
    .set(status_value(entry.status));
}

fn status_value(status: HealthStatus) -> f64 {
    match status {
        HealthStatus::Normal => 0.0,
        HealthStatus::Slow => 1.0,
        HealthStatus::Down => 2.0,
        HealthStatus::Unknown => 3.0,
    }
}
