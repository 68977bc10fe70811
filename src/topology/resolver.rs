//! Partition → master server resolution.
//!
//! # Responsibilities
//! - Find the group owning a partition
//! - Pick the first master-tagged member of that group
//! - Degrade to a sentinel address instead of failing the run
//!
//! # Design Decisions
//! - A single bad partition must not block probing the rest of the cluster
//! - Linear scan by default; `ResolverIndex` precomputes the same answers

use std::collections::HashMap;

use thiserror::Error;

use crate::routing::PartitionId;
use crate::topology::types::{GroupId, TopologySnapshot};

/// Server address recorded when a partition cannot be resolved.
pub const UNRESOLVED_SERVER: &str = "unresolved";

/// Why a partition could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("partition {0} not found in topology")]
    UnknownPartition(PartitionId),

    #[error("partition {partition} assigned to unknown group {group}")]
    UnknownGroup { partition: PartitionId, group: GroupId },

    #[error("group {group} serving partition {partition} has no master")]
    NoMaster { partition: PartitionId, group: GroupId },
}

/// Resolve the master address for a partition.
pub fn try_resolve_server(
    partition_id: PartitionId,
    snapshot: &TopologySnapshot,
) -> Result<&str, ResolveError> {
    let assignment = snapshot
        .partition(partition_id)
        .ok_or(ResolveError::UnknownPartition(partition_id))?;

    let group = snapshot
        .group(assignment.group_id)
        .ok_or(ResolveError::UnknownGroup {
            partition: partition_id,
            group: assignment.group_id,
        })?;

    group
        .master()
        .map(|m| m.address.as_str())
        .ok_or(ResolveError::NoMaster {
            partition: partition_id,
            group: group.group_id,
        })
}

/// Resolve the master address for a partition, or [`UNRESOLVED_SERVER`].
///
/// Failures are logged and counted, never propagated.
pub fn resolve_server(partition_id: PartitionId, snapshot: &TopologySnapshot) -> &str {
    match try_resolve_server(partition_id, snapshot) {
        Ok(addr) => addr,
        Err(e) => {
            report_unresolved(&e);
            UNRESOLVED_SERVER
        }
    }
}

fn report_unresolved(err: &ResolveError) {
    tracing::warn!(error = %err, "Partition could not be resolved to a server");
    crate::observability::metrics::record_unresolved_partition();
}

/// Precomputed partition → master lookup for one snapshot.
#[derive(Debug, Clone)]
pub struct ResolverIndex<'a> {
    masters: HashMap<PartitionId, Result<&'a str, ResolveError>>,
}

impl<'a> ResolverIndex<'a> {
    /// Build the index over every partition listed in the snapshot.
    pub fn new(snapshot: &'a TopologySnapshot) -> Self {
        let masters = snapshot
            .partitions
            .iter()
            .map(|p| (p.partition_id, try_resolve_server(p.partition_id, snapshot)))
            .collect();
        Self { masters }
    }

    /// Same contract as [`resolve_server`].
    pub fn resolve(&self, partition_id: PartitionId) -> &'a str {
        match self.masters.get(&partition_id) {
            Some(Ok(addr)) => *addr,
            Some(Err(e)) => {
                report_unresolved(e);
                UNRESOLVED_SERVER
            }
            None => {
                report_unresolved(&ResolveError::UnknownPartition(partition_id));
                UNRESOLVED_SERVER
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::types::{GroupMember, MemberRole, PartitionAssignment, ServerGroup};

    fn snapshot() -> TopologySnapshot {
        TopologySnapshot {
            groups: vec![
                ServerGroup {
                    group_id: 1,
                    members: vec![
                        GroupMember { address: "10.0.0.2:6379".into(), role: MemberRole::Other },
                        GroupMember { address: "10.0.0.1:6379".into(), role: MemberRole::Master },
                        GroupMember { address: "10.0.0.3:6379".into(), role: MemberRole::Master },
                    ],
                },
                ServerGroup {
                    group_id: 2,
                    members: vec![GroupMember {
                        address: "10.0.1.2:6379".into(),
                        role: MemberRole::Other,
                    }],
                },
            ],
            proxies: vec![],
            partitions: vec![
                PartitionAssignment { partition_id: 0, group_id: 1 },
                PartitionAssignment { partition_id: 1, group_id: 2 },
                PartitionAssignment { partition_id: 2, group_id: 9 },
            ],
        }
    }

    #[test]
    fn test_first_master_wins() {
        let snap = snapshot();
        assert_eq!(resolve_server(0, &snap), "10.0.0.1:6379");
    }

    #[test]
    fn test_failures_yield_sentinel() {
        let snap = snapshot();
        assert_eq!(
            try_resolve_server(1, &snap),
            Err(ResolveError::NoMaster { partition: 1, group: 2 })
        );
        assert_eq!(
            try_resolve_server(2, &snap),
            Err(ResolveError::UnknownGroup { partition: 2, group: 9 })
        );
        assert_eq!(
            try_resolve_server(700, &snap),
            Err(ResolveError::UnknownPartition(700))
        );

        assert_eq!(resolve_server(1, &snap), UNRESOLVED_SERVER);
        assert_eq!(resolve_server(2, &snap), UNRESOLVED_SERVER);
        assert_eq!(resolve_server(700, &snap), UNRESOLVED_SERVER);
    }

    #[test]
    fn test_index_matches_linear_scan() {
        let snap = snapshot();
        let index = ResolverIndex::new(&snap);
        for partition in [0, 1, 2, 700] {
            assert_eq!(index.resolve(partition), resolve_server(partition, &snap));
        }
    }
}
