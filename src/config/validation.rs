//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that the selected topology source is fully specified
//! - Validate value ranges (timeouts > 0, thresholds ordered)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProbeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::{ProbeConfig, TopologySourceKind};

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("topology.dashboard_url is not a valid URL: {0}")]
    InvalidDashboardUrl(String),

    #[error("topology.file_path is required when source = \"file\"")]
    MissingTopologyFile,

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("thresholds.slow_ms ({slow_ms}) must be below thresholds.down_ms ({down_ms})")]
    ThresholdOrder { slow_ms: f64, down_ms: f64 },

    #[error("probe.failure_latency_ms ({failure_ms}) must exceed thresholds.down_ms ({down_ms})")]
    FailureLatencyTooLow { failure_ms: u64, down_ms: f64 },
}

/// Validate a parsed configuration, collecting every error.
pub fn validate_config(config: &ProbeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match config.topology.source {
        TopologySourceKind::Dashboard => {
            if let Err(e) = url::Url::parse(&config.topology.dashboard_url) {
                errors.push(ValidationError::InvalidDashboardUrl(format!(
                    "{} ({})",
                    config.topology.dashboard_url, e
                )));
            }
            if config.topology.request_timeout_secs == 0 {
                errors.push(ValidationError::Zero("topology.request_timeout_secs"));
            }
        }
        TopologySourceKind::File => {
            if config.topology.file_path.as_deref().map_or(true, str::is_empty) {
                errors.push(ValidationError::MissingTopologyFile);
            }
        }
    }

    if config.probe.sample_count == 0 {
        errors.push(ValidationError::Zero("probe.sample_count"));
    }
    if config.probe.timeout_secs == 0 {
        errors.push(ValidationError::Zero("probe.timeout_secs"));
    }

    let thresholds = &config.thresholds;
    if thresholds.slow_ms >= thresholds.down_ms {
        errors.push(ValidationError::ThresholdOrder {
            slow_ms: thresholds.slow_ms,
            down_ms: thresholds.down_ms,
        });
    }
    if (config.probe.failure_latency_ms as f64) <= thresholds.down_ms {
        errors.push(ValidationError::FailureLatencyTooLow {
            failure_ms: config.probe.failure_latency_ms,
            down_ms: thresholds.down_ms,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ProbeConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ProbeConfig::default();
        config.topology.source = TopologySourceKind::File;
        config.probe.sample_count = 0;
        config.thresholds.slow_ms = 5000.0;

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::MissingTopologyFile));
        assert!(errors.contains(&ValidationError::Zero("probe.sample_count")));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::ThresholdOrder { .. })));
    }

    #[test]
    fn test_rejects_bad_dashboard_url() {
        let mut config = ProbeConfig::default();
        config.topology.dashboard_url = "not a url".into();

        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::InvalidDashboardUrl(_)));
    }

    #[test]
    fn test_failure_latency_must_read_as_down() {
        let mut config = ProbeConfig::default();
        config.probe.failure_latency_ms = 1000;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::FailureLatencyTooLow {
                failure_ms: 1000,
                down_ms: 2800.0
            }]
        );
    }
}
