//! Dashboard HTTP topology provider.
//!
//! # Responsibilities
//! - Query the cluster dashboard's JSON API
//! - Enforce a request timeout on every call
//!
//! # Endpoints
//! - `GET /api/server_groups` → server groups with members
//! - `GET /api/proxy/list`    → proxies
//! - `GET /api/slots`         → partition assignments

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::topology::provider::TopologyProvider;
use crate::topology::types::{
    PartitionAssignment, Proxy, ServerGroup, TopologyError, TopologyResult,
};

const SERVER_GROUPS_PATH: &str = "api/server_groups";
const PROXY_LIST_PATH: &str = "api/proxy/list";
const SLOTS_PATH: &str = "api/slots";

/// Topology provider backed by the dashboard API.
#[derive(Debug, Clone)]
pub struct DashboardProvider {
    base_url: Url,
    client: reqwest::Client,
}

impl DashboardProvider {
    /// Create a provider for the dashboard at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> TopologyResult<Self> {
        let mut base_url: Url = base_url.parse().map_err(|e| {
            TopologyError::Config(format!("invalid dashboard URL '{}': {}", base_url, e))
        })?;
        // Url::join replaces the last segment unless the base ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()
            .map_err(|e| TopologyError::Config(format!("cannot build HTTP client: {}", e)))?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> TopologyResult<T> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| TopologyError::Config(format!("invalid endpoint '{}': {}", path, e)))?;

        tracing::debug!(url = %url, "Fetching topology");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| TopologyError::Request {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TopologyError::Request {
                url: url.to_string(),
                message: format!("dashboard returned status {}", status),
            });
        }

        response.json::<T>().await.map_err(|e| TopologyError::Decode {
            source_name: url.to_string(),
            message: e.to_string(),
        })
    }
}

impl TopologyProvider for DashboardProvider {
    async fn server_groups(&self) -> TopologyResult<Vec<ServerGroup>> {
        self.get_json(SERVER_GROUPS_PATH).await
    }

    async fn proxies(&self) -> TopologyResult<Vec<Proxy>> {
        self.get_json(PROXY_LIST_PATH).await
    }

    async fn partitions(&self) -> TopologyResult<Vec<PartitionAssignment>> {
        self.get_json(SLOTS_PATH).await
    }
}
