//! Partition routing subsystem.
//!
//! # Data Flow
//! ```text
//! Synthetic key
//!     → partition.rs (CRC-32 mod 1024)
//!     → PartitionId
//!     → topology::resolver (partition → group master)
//! ```
//!
//! # Design Decisions
//! - Routing is a pure function; no state, no errors
//! - Partition count is fixed by the cluster, not by configuration

pub mod partition;

pub use partition::{route, PartitionId, PARTITION_COUNT};
