//! Per-address latency buckets.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::probe::Observation;

/// Address → latencies observed through or at that address.
///
/// Every observation lands in two buckets: its proxy's and its server's.
/// Keys are ordered so that iteration, and therefore the report, is
/// deterministic.
#[derive(Debug, Clone, Default)]
pub struct LatencyBuckets {
    buckets: BTreeMap<String, Vec<Duration>>,
}

impl LatencyBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_observations<'a>(observations: impl IntoIterator<Item = &'a Observation>) -> Self {
        let mut buckets = Self::new();
        for obs in observations {
            buckets.record(&obs.proxy_address, obs.latency);
            buckets.record(&obs.server_address, obs.latency);
        }
        buckets
    }

    pub fn record(&mut self, address: &str, latency: Duration) {
        self.buckets
            .entry(address.to_string())
            .or_default()
            .push(latency);
    }

    pub fn get(&self, address: &str) -> Option<&[Duration]> {
        self.buckets.get(address).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Duration])> {
        self.buckets
            .iter()
            .map(|(addr, latencies)| (addr.as_str(), latencies.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Mean latency in milliseconds, or `None` for an empty bucket.
///
/// The mean is taken in whole nanoseconds before conversion.
pub fn average_ms(latencies: &[Duration]) -> Option<f64> {
    if latencies.is_empty() {
        return None;
    }
    let total: u128 = latencies.iter().map(Duration::as_nanos).sum();
    let mean_nanos = total / latencies.len() as u128;
    Some(mean_nanos as f64 / 1_000_000.0)
}

/// Number of samples strictly above `limit`.
pub fn count_above(latencies: &[Duration], limit: Duration) -> usize {
    latencies.iter().filter(|&&l| l > limit).count()
}
