//! A single timed probe result.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::routing::PartitionId;

/// One probe: which key, which partition, the proxy that carried it, the
/// server that should have answered it, and how long it took.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub key: String,
    pub partition_id: PartitionId,
    pub proxy_address: String,
    pub server_address: String,
    pub latency: Duration,
    /// Failure cause when `latency` is the failure sentinel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Observation {
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// Verbose per-key report line.
impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "latency={:?}; proxy={}; server={}; partition={}; key={}",
            self.latency, self.proxy_address, self.server_address, self.partition_id, self.key
        )
    }
}
