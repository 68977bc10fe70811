//! Cluster topology subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     provider.rs selects a source from config
//!     → dashboard.rs (HTTP API) or file.rs (local snapshot)
//!     → TopologySnapshot (groups, proxies, partitions)
//!
//! Per sample key:
//!     PartitionId
//!     → resolver.rs (partition → group → first master)
//!     → server address or "unresolved"
//! ```
//!
//! # Design Decisions
//! - Snapshot is fetched once and is read-only for the whole run
//! - Retrieval failures are fatal; resolution failures are not

pub mod dashboard;
pub mod file;
pub mod provider;
pub mod resolver;
pub mod types;

pub use provider::{fetch_snapshot, TopologyProvider, TopologySource};
pub use resolver::{resolve_server, try_resolve_server, ResolveError, ResolverIndex, UNRESOLVED_SERVER};
pub use types::{
    GroupId, GroupMember, MemberRole, PartitionAssignment, Proxy, ServerGroup, TopologyError,
    TopologyResult, TopologySnapshot,
};
