//! Health aggregation and classification subsystem.
//!
//! # Data Flow
//! ```text
//! Observations (all proxies)
//!     → bucket.rs (latencies keyed by proxy address AND server address)
//!     → role.rs (proxy iff listed in the topology's proxies)
//!     → classifier.rs
//!         pass A: servers → statuses + any_server_down
//!         pass B: proxies → statuses, suppressed if any_server_down
//!     → report.rs (summary lines / JSON)
//! ```
//!
//! # Design Decisions
//! - Server and proxy thresholds share averages but not rules
//! - The cross-tier flag is a value returned by pass A, not shared state
//! - Classification never fails; empty buckets are "unknown"

pub mod bucket;
pub mod classifier;
pub mod report;
pub mod role;

pub use bucket::{average_ms, LatencyBuckets};
pub use classifier::{classify, classify_proxies, classify_servers, HealthStatus, ServerPass};
pub use report::{write_observations, HealthEntry, HealthReport};
pub use role::{Role, RoleMap};
