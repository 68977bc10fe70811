//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events, stderr)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → Log aggregation (stderr, pretty or JSON)
//!     → Prometheus textfile written at the end of the run
//! ```
//!
//! # Design Decisions
//! - Structured logging for machine parsing
//! - Run ID flows through every event via the run span
//! - Metrics are cheap and optional

pub mod logging;
pub mod metrics;
