//! Two-pass health classification.
//!
//! # Rules
//! ```text
//! Pass A (servers):
//!     avg > down_ms  → Down   (and any_server_down = true)
//!     avg > slow_ms  → Slow
//!     otherwise      → Normal
//!
//! Pass B (proxies), applied in order:
//!     1. same thresholds as pass A
//!     2. slow samples (> slow_sample_ms) > max_slow_samples → Down
//!     3. any_server_down → Normal
//! ```
//!
//! Rule 3 attributes proxy latency to a known server outage. It applies to
//! every proxy whenever any server is down, not only to proxies in front of
//! that server.

use std::fmt;

use serde::Serialize;

use crate::config::ThresholdConfig;
use crate::health::bucket::{average_ms, count_above, LatencyBuckets};
use crate::health::report::{HealthEntry, HealthReport};
use crate::health::role::{Role, RoleMap};
use crate::probe::Observation;

/// Health state of one address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Normal,
    Slow,
    Down,
    /// No samples to judge by.
    Unknown,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Normal => "normal",
            HealthStatus::Slow => "slow",
            HealthStatus::Down => "down",
            HealthStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status from the average alone.
pub fn status_for_average(average_ms: Option<f64>, thresholds: &ThresholdConfig) -> HealthStatus {
    match average_ms {
        None => HealthStatus::Unknown,
        Some(avg) if avg > thresholds.down_ms => HealthStatus::Down,
        Some(avg) if avg > thresholds.slow_ms => HealthStatus::Slow,
        Some(_) => HealthStatus::Normal,
    }
}

/// Output of the server pass.
#[derive(Debug, Clone)]
pub struct ServerPass {
    pub entries: Vec<HealthEntry>,
    pub any_server_down: bool,
}

/// Pass A: classify every server address.
pub fn classify_servers(
    buckets: &LatencyBuckets,
    roles: &RoleMap,
    thresholds: &ThresholdConfig,
) -> ServerPass {
    let mut any_server_down = false;
    let entries = buckets
        .iter()
        .filter(|(addr, _)| roles.role_of(addr) == Role::Server)
        .map(|(addr, latencies)| {
            let average = average_ms(latencies);
            let status = status_for_average(average, thresholds);
            if status == HealthStatus::Down {
                any_server_down = true;
            }
            HealthEntry {
                address: addr.to_string(),
                role: Role::Server,
                average_ms: average,
                samples: latencies.len(),
                slow_samples: count_above(latencies, thresholds.slow_sample()),
                status,
            }
        })
        .collect();

    ServerPass {
        entries,
        any_server_down,
    }
}

/// Pass B: classify every proxy address, given the outcome of pass A.
pub fn classify_proxies(
    buckets: &LatencyBuckets,
    roles: &RoleMap,
    thresholds: &ThresholdConfig,
    any_server_down: bool,
) -> Vec<HealthEntry> {
    buckets
        .iter()
        .filter(|(addr, _)| roles.role_of(addr) == Role::Proxy)
        .map(|(addr, latencies)| {
            let average = average_ms(latencies);
            let slow_samples = count_above(latencies, thresholds.slow_sample());

            let mut status = status_for_average(average, thresholds);
            if slow_samples > thresholds.max_slow_samples {
                status = HealthStatus::Down;
            }
            if any_server_down && average.is_some() {
                status = HealthStatus::Normal;
            }

            HealthEntry {
                address: addr.to_string(),
                role: Role::Proxy,
                average_ms: average,
                samples: latencies.len(),
                slow_samples,
                status,
            }
        })
        .collect()
}

/// Bucket the observations and run both passes, servers first.
pub fn classify(
    observations: &[Observation],
    roles: &RoleMap,
    thresholds: &ThresholdConfig,
) -> HealthReport {
    let buckets = LatencyBuckets::from_observations(observations);
    let ServerPass {
        mut entries,
        any_server_down,
    } = classify_servers(&buckets, roles, thresholds);

    if any_server_down {
        tracing::warn!("At least one server is down; proxy alarms are suppressed");
    }

    entries.extend(classify_proxies(&buckets, roles, thresholds, any_server_down));

    HealthReport {
        entries,
        any_server_down,
    }
}
