//! Codis cluster latency probe.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌──────────────┐     ┌──────────────────────────────────────────────┐
//!   │  dashboard   │     │                  PROBE RUN                   │
//!   │  API / file  │────▶│  topology ──▶ sampler ──▶ health ──▶ report  │
//!   └──────────────┘     │               │    ▲                         │
//!                        │      routing ─┘    │ RESP SET per key        │
//!                        └────────────────────┼─────────────────────────┘
//!                                             ▼
//!                                    proxy ──▶ group master
//! ```
//!
//! One invocation takes one snapshot, probes every proxy with the synthetic
//! key population, prints the per-address health and exits.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::Instrument;

use codis_probe::config::{self, ProbeConfig, ReportFormat, TopologySourceKind};
use codis_probe::lifecycle::{emit_report, run, signals};
use codis_probe::observability::{logging, metrics};
use codis_probe::probe::RespConnector;
use codis_probe::topology::TopologySource;

#[derive(Parser)]
#[command(name = "codis-probe")]
#[command(about = "Probe proxy and server latency of a Codis cluster", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dashboard base URL (overrides the configured topology source).
    #[arg(short, long, conflicts_with = "topology_file")]
    dashboard: Option<String>,

    /// Read topology from a TOML/JSON snapshot file instead of the dashboard.
    #[arg(short, long)]
    topology_file: Option<String>,

    /// Number of synthetic keys per proxy.
    #[arg(short = 'n', long)]
    samples: Option<usize>,

    /// Suppress per-key latency lines.
    #[arg(short, long)]
    quiet: bool,

    /// Print the summary as JSON.
    #[arg(long)]
    json: bool,

    /// Probe all proxies concurrently.
    #[arg(long)]
    parallel: bool,

    /// Write Prometheus metrics to this file.
    #[arg(long)]
    metrics_file: Option<String>,
}

impl Cli {
    fn apply(&self, config: &mut ProbeConfig) {
        if let Some(url) = &self.dashboard {
            config.topology.source = TopologySourceKind::Dashboard;
            config.topology.dashboard_url = url.clone();
        }
        if let Some(path) = &self.topology_file {
            config.topology.source = TopologySourceKind::File;
            config.topology.file_path = Some(path.clone());
        }
        if let Some(samples) = self.samples {
            config.probe.sample_count = samples;
        }
        if self.quiet {
            config.output.quiet = true;
        }
        if self.json {
            config.output.format = ReportFormat::Json;
        }
        if self.parallel {
            config.probe.parallel_proxies = true;
        }
        if let Some(path) = &self.metrics_file {
            config.observability.metrics_textfile = Some(path.clone());
        }
    }
}

fn load(cli: &Cli) -> Result<ProbeConfig, config::ConfigError> {
    let mut config = match &cli.config {
        Some(path) => config::parse_config(path)?,
        None => ProbeConfig::default(),
    };
    cli.apply(&mut config);
    config::validate_config(&config).map_err(config::ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("codis-probe: {}", e);
            return Ok(ExitCode::from(2));
        }
    };

    logging::init_logging(&config.observability);

    let metrics_handle = match &config.observability.metrics_textfile {
        Some(_) => Some(metrics::init_metrics()?),
        None => None,
    };

    let run_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("probe_run", run_id = %run_id);

    tracing::info!(
        parent: &span,
        source = ?config.topology.source,
        samples = config.probe.sample_count,
        timeout_secs = config.probe.timeout_secs,
        parallel = config.probe.parallel_proxies,
        "Configuration loaded"
    );

    let provider = TopologySource::from_config(&config.topology)?;
    let connector = RespConnector::new(config.probe.timeout());

    let work = run(&config, &provider, &connector).instrument(span.clone());
    let outcome = match signals::unless_interrupted(work, signals::interrupted()).await {
        Some(Ok(outcome)) => outcome,
        None => {
            tracing::warn!(parent: &span, "Interrupted; no report produced");
            return Ok(ExitCode::from(signals::INTERRUPTED_EXIT_CODE));
        }
        Some(Err(e)) => {
            tracing::error!(parent: &span, error = %e, "Probe run aborted");
            return Ok(ExitCode::FAILURE);
        }
    };

    let stdout = std::io::stdout();
    emit_report(&config.output, &outcome, &mut stdout.lock())?;

    if let (Some(handle), Some(path)) = (&metrics_handle, &config.observability.metrics_textfile) {
        if let Err(e) = metrics::write_textfile(handle, Path::new(path)) {
            tracing::error!(parent: &span, path = %path, error = %e, "Failed to write metrics textfile");
        }
    }

    Ok(ExitCode::SUCCESS)
}
