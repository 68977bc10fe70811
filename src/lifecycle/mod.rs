//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Fetch topology → Sample proxies → Classify → Emit report
//!
//! Signals (signals.rs):
//!     SIGINT → abort the run before any report is printed
//! ```
//!
//! # Design Decisions
//! - Ordered run: topology first, probing only once it is complete
//! - Topology failure is the only fatal runtime error

pub mod signals;
pub mod startup;

pub use signals::{unless_interrupted, INTERRUPTED_EXIT_CODE};
pub use startup::{emit_report, run, RunError, RunOutcome};
