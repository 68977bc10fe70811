//! Topology data model and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::routing::PartitionId;

/// Group identifier.
pub type GroupId = u32;

/// Role of a group member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Master,
    /// Any non-master role (slave, offline, ...).
    #[serde(other)]
    Other,
}

/// A server belonging to a group.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GroupMember {
    #[serde(alias = "addr")]
    pub address: String,

    #[serde(alias = "type")]
    pub role: MemberRole,
}

/// A replica set backing one or more partitions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerGroup {
    #[serde(alias = "id")]
    pub group_id: GroupId,

    #[serde(alias = "servers", default)]
    pub members: Vec<GroupMember>,
}

impl ServerGroup {
    /// First member tagged master, if any.
    pub fn master(&self) -> Option<&GroupMember> {
        self.members.iter().find(|m| m.role == MemberRole::Master)
    }
}

/// A front-end proxy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Proxy {
    #[serde(alias = "addr")]
    pub address: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl Proxy {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            id: None,
            state: None,
        }
    }
}

/// Partition → owning group assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct PartitionAssignment {
    #[serde(alias = "id")]
    pub partition_id: PartitionId,

    pub group_id: GroupId,
}

/// Everything a probe run needs to know about the cluster.
///
/// Read-only for the duration of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TopologySnapshot {
    pub groups: Vec<ServerGroup>,
    pub proxies: Vec<Proxy>,
    pub partitions: Vec<PartitionAssignment>,
}

impl TopologySnapshot {
    pub fn group(&self, group_id: GroupId) -> Option<&ServerGroup> {
        self.groups.iter().find(|g| g.group_id == group_id)
    }

    pub fn partition(&self, partition_id: PartitionId) -> Option<&PartitionAssignment> {
        self.partitions
            .iter()
            .find(|p| p.partition_id == partition_id)
    }
}

/// Errors that can occur while retrieving topology.
#[derive(Debug, Error)]
pub enum TopologyError {
    /// Coordination store / dashboard unreachable or returned an error.
    #[error("topology request to {url} failed: {message}")]
    Request { url: String, message: String },

    /// Response or file could not be decoded.
    #[error("invalid topology data from {source_name}: {message}")]
    Decode {
        source_name: String,
        message: String,
    },

    /// Local snapshot file could not be read.
    #[error("cannot read topology file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Provider misconfigured.
    #[error("topology source misconfigured: {0}")]
    Config(String),
}

/// Result type for topology operations.
pub type TopologyResult<T> = Result<T, TopologyError>;
