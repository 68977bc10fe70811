//! Topology provider seam.
//!
//! # Responsibilities
//! - Define the three topology reads a run needs
//! - Assemble them into one immutable `TopologySnapshot`
//! - Select the configured provider at startup

use std::future::Future;

use crate::config::{TopologyConfig, TopologySourceKind};
use crate::topology::dashboard::DashboardProvider;
use crate::topology::file::FileProvider;
use crate::topology::types::{
    PartitionAssignment, Proxy, ServerGroup, TopologyError, TopologyResult, TopologySnapshot,
};

/// Source of cluster topology.
///
/// Any error aborts the run before probing starts.
pub trait TopologyProvider {
    /// All server groups with their members.
    fn server_groups(&self) -> impl Future<Output = TopologyResult<Vec<ServerGroup>>> + Send;

    /// All known proxies.
    fn proxies(&self) -> impl Future<Output = TopologyResult<Vec<Proxy>>> + Send;

    /// Partition → group assignments.
    fn partitions(&self) -> impl Future<Output = TopologyResult<Vec<PartitionAssignment>>> + Send;
}

/// Read the full snapshot from a provider.
pub async fn fetch_snapshot<P: TopologyProvider>(provider: &P) -> TopologyResult<TopologySnapshot> {
    let groups = provider.server_groups().await?;
    let proxies = provider.proxies().await?;
    let partitions = provider.partitions().await?;

    tracing::info!(
        groups = groups.len(),
        proxies = proxies.len(),
        partitions = partitions.len(),
        "Topology snapshot loaded"
    );

    Ok(TopologySnapshot {
        groups,
        proxies,
        partitions,
    })
}

/// The provider chosen by configuration.
#[derive(Debug, Clone)]
pub enum TopologySource {
    Dashboard(DashboardProvider),
    File(FileProvider),
}

impl TopologySource {
    /// Build the provider selected by `config.source`.
    pub fn from_config(config: &TopologyConfig) -> TopologyResult<Self> {
        match config.source {
            TopologySourceKind::Dashboard => Ok(Self::Dashboard(DashboardProvider::new(
                &config.dashboard_url,
                config.request_timeout(),
            )?)),
            TopologySourceKind::File => {
                let path = config.file_path.as_deref().ok_or_else(|| {
                    TopologyError::Config("file source requires topology.file_path".into())
                })?;
                Ok(Self::File(FileProvider::new(path)))
            }
        }
    }
}

impl TopologyProvider for TopologySource {
    async fn server_groups(&self) -> TopologyResult<Vec<ServerGroup>> {
        match self {
            Self::Dashboard(p) => p.server_groups().await,
            Self::File(p) => p.server_groups().await,
        }
    }

    async fn proxies(&self) -> TopologyResult<Vec<Proxy>> {
        match self {
            Self::Dashboard(p) => p.proxies().await,
            Self::File(p) => p.proxies().await,
        }
    }

    async fn partitions(&self) -> TopologyResult<Vec<PartitionAssignment>> {
        match self {
            Self::Dashboard(p) => p.partitions().await,
            Self::File(p) => p.partitions().await,
        }
    }
}
