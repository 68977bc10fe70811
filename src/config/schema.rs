//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the probe.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for a probe run.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProbeConfig {
    /// Where the cluster topology is read from.
    pub topology: TopologyConfig,

    /// Synthetic key population and probe client settings.
    pub probe: ProbeSettings,

    /// Health classification thresholds.
    pub thresholds: ThresholdConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Report output settings.
    pub output: OutputConfig,
}

/// Kind of topology source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TopologySourceKind {
    /// Cluster dashboard HTTP API.
    Dashboard,
    /// Snapshot file on local disk (TOML or JSON).
    File,
}

/// Topology source configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TopologyConfig {
    /// Which provider to use.
    pub source: TopologySourceKind,

    /// Dashboard base URL (e.g., "http://127.0.0.1:18087").
    pub dashboard_url: String,

    /// Snapshot file path, used when `source = "file"`.
    pub file_path: Option<String>,

    /// Dashboard request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            source: TopologySourceKind::Dashboard,
            dashboard_url: "http://127.0.0.1:18087".to_string(),
            file_path: None,
            request_timeout_secs: 5,
        }
    }
}

impl TopologyConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Probe settings: key population and client behavior.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeSettings {
    /// Prefix of every synthetic key; the ordinal is appended.
    pub key_prefix: String,

    /// Number of synthetic keys probed through each proxy.
    pub sample_count: usize,

    /// Size in bytes of the value written under each key.
    pub payload_size: usize,

    /// Connect and per-operation timeout in seconds.
    pub timeout_secs: u64,

    /// Latency recorded for a failed probe, in milliseconds.
    /// Must sit above the down threshold so failures read as "down".
    pub failure_latency_ms: u64,

    /// Probe all proxies concurrently instead of one after another.
    pub parallel_proxies: bool,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            key_prefix: "codis:test:".to_string(),
            sample_count: 2048,
            payload_size: 100,
            timeout_secs: 3,
            failure_latency_ms: 60_000,
            parallel_proxies: false,
        }
    }
}

impl ProbeSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn failure_latency(&self) -> Duration {
        Duration::from_millis(self.failure_latency_ms)
    }
}

/// Health classification thresholds.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Average latency (ms) above which an address is "down".
    pub down_ms: f64,

    /// Average latency (ms) above which an address is "slow".
    pub slow_ms: f64,

    /// A single proxy sample above this many ms counts as a slow sample.
    pub slow_sample_ms: u64,

    /// A proxy with more slow samples than this is "down".
    pub max_slow_samples: usize,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            down_ms: 2800.0,
            slow_ms: 30.0,
            slow_sample_ms: 2000,
            max_slow_samples: 4,
        }
    }
}

impl ThresholdConfig {
    pub fn slow_sample(&self) -> Duration {
        Duration::from_millis(self.slow_sample_ms)
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log line format.
    pub log_format: LogFormat,

    /// Write Prometheus text exposition here at the end of the run.
    pub metrics_textfile: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_textfile: None,
        }
    }
}

/// Report format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable summary lines.
    Text,
    /// One JSON document.
    Json,
}

/// Report output configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Suppress the per-key latency lines.
    pub quiet: bool,

    /// Summary format.
    pub format: ReportFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            quiet: false,
            format: ReportFormat::Text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProbeConfig::default();
        assert_eq!(config.probe.sample_count, 2048);
        assert_eq!(config.probe.payload_size, 100);
        assert_eq!(config.probe.timeout(), Duration::from_secs(3));
        assert_eq!(config.thresholds.down_ms, 2800.0);
        assert_eq!(config.thresholds.slow_ms, 30.0);
        assert_eq!(config.thresholds.slow_sample(), Duration::from_secs(2));
        assert_eq!(config.thresholds.max_slow_samples, 4);
        assert_eq!(config.topology.source, TopologySourceKind::Dashboard);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ProbeConfig = toml::from_str(
            r#"
            [topology]
            source = "file"
            file_path = "topology.toml"

            [probe]
            sample_count = 16
            "#,
        )
        .unwrap();

        assert_eq!(config.topology.source, TopologySourceKind::File);
        assert_eq!(config.topology.file_path.as_deref(), Some("topology.toml"));
        assert_eq!(config.probe.sample_count, 16);
        assert_eq!(config.probe.key_prefix, "codis:test:");
        assert_eq!(config.output.format, ReportFormat::Text);
    }
}
