//! Codis cluster latency probe library.

pub mod config;
pub mod health;
pub mod lifecycle;
pub mod observability;
pub mod probe;
pub mod routing;
pub mod topology;

pub use config::ProbeConfig;
pub use health::{HealthReport, HealthStatus};
pub use lifecycle::{run, RunError, RunOutcome};
