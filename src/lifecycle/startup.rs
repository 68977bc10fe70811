//! Run driver.
//!
//! # Responsibilities
//! - Fetch the topology snapshot (fatal on failure)
//! - Sample every proxy
//! - Classify and export per-address health
//! - Emit the report in the configured format

use std::io::Write;

use thiserror::Error;

use crate::config::{OutputConfig, ProbeConfig, ReportFormat};
use crate::health::{classify, write_observations, HealthReport, HealthStatus, RoleMap};
use crate::observability::metrics;
use crate::probe::{Observation, ProbeConnector, Sampler};
use crate::topology::{fetch_snapshot, TopologyError, TopologyProvider};

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum RunError {
    /// Topology could not be retrieved; nothing was probed.
    #[error("topology retrieval failed: {0}")]
    Topology(#[from] TopologyError),

    /// The report could not be written.
    #[error("cannot write report: {0}")]
    Output(#[from] std::io::Error),
}

/// Everything one run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub observations: Vec<Observation>,
    pub report: HealthReport,
}

/// Execute one probe run: topology → samples → classification.
pub async fn run<P, C>(config: &ProbeConfig, provider: &P, connector: &C) -> Result<RunOutcome, RunError>
where
    P: TopologyProvider,
    C: ProbeConnector,
{
    let snapshot = fetch_snapshot(provider).await?;
    if snapshot.proxies.is_empty() {
        tracing::warn!("Topology lists no proxies; nothing to probe");
    }

    let observations = Sampler::new(connector, &config.probe)
        .sample_all(&snapshot)
        .await;

    let roles = RoleMap::from_snapshot(&snapshot);
    let report = classify(&observations, &roles, &config.thresholds);

    for entry in &report.entries {
        metrics::record_address_health(entry);
    }

    tracing::info!(
        observations = observations.len(),
        addresses = report.entries.len(),
        down = report.count(HealthStatus::Down),
        slow = report.count(HealthStatus::Slow),
        any_server_down = report.any_server_down,
        "Probe run complete"
    );

    Ok(RunOutcome {
        observations,
        report,
    })
}

/// Write the per-key lines (unless quiet) and the summary.
pub fn emit_report<W: Write>(output: &OutputConfig, outcome: &RunOutcome, out: &mut W) -> Result<(), RunError> {
    match output.format {
        ReportFormat::Text => {
            if !output.quiet {
                write_observations(&outcome.observations, out)?;
            }
            outcome.report.write_text(out)?;
        }
        ReportFormat::Json => outcome.report.write_json(out)?,
    }
    out.flush()?;
    Ok(())
}
