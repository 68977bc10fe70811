//! Latency probing subsystem.
//!
//! # Data Flow
//! ```text
//! For each proxy in the snapshot:
//!     sampler.rs creates one client via ProbeConnector
//!     → for each synthetic key:
//!         routing::route(key) → partition
//!         topology resolver  → server address
//!         client.rs / resp.rs → timed SET through the proxy
//!         → Observation (sentinel latency on failure)
//! ```
//!
//! # Design Decisions
//! - Probe transport sits behind a trait; the RESP client is one implementation
//! - Failures never abort sampling; they become observations
//! - No retries: one write per key per proxy

pub mod client;
pub mod observation;
pub mod resp;
pub mod sampler;

pub use client::{ProbeClient, ProbeConnector, ProbeError, ProbeResult};
pub use observation::Observation;
pub use resp::{RespConnector, RespProbeClient};
pub use sampler::{sample_key, Sampler};
