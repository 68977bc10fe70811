//! Latency sampling through one proxy.
//!
//! # Responsibilities
//! - Generate the synthetic key population
//! - Route and resolve every key
//! - Time one write per key through the proxy
//! - Turn probe failures into sentinel observations
//!
//! # Design Decisions
//! - Exactly one observation per key, whatever fails
//! - Sequential within a proxy: one connection, one in-flight write
//! - Across proxies the caller decides (see `sample_all`)

use futures_util::future::join_all;

use crate::config::ProbeSettings;
use crate::observability::metrics;
use crate::probe::client::{ProbeClient, ProbeConnector};
use crate::probe::observation::Observation;
use crate::routing::route;
use crate::topology::{ResolverIndex, TopologySnapshot};

/// Name of the `ordinal`-th synthetic key.
pub fn sample_key(prefix: &str, ordinal: usize) -> String {
    format!("{}{}", prefix, ordinal)
}

/// Drives probes for the configured key population.
#[derive(Debug)]
pub struct Sampler<'a, C> {
    connector: &'a C,
    settings: &'a ProbeSettings,
}

impl<'a, C: ProbeConnector> Sampler<'a, C> {
    pub fn new(connector: &'a C, settings: &'a ProbeSettings) -> Self {
        Self {
            connector,
            settings,
        }
    }

    /// Probe every synthetic key through `proxy_address`.
    pub async fn sample(&self, proxy_address: &str, snapshot: &TopologySnapshot) -> Vec<Observation> {
        let index = ResolverIndex::new(snapshot);
        let mut client = self.connector.client(proxy_address);
        let mut observations = Vec::with_capacity(self.settings.sample_count);
        let mut failures = 0usize;

        tracing::info!(
            proxy = %proxy_address,
            keys = self.settings.sample_count,
            "Sampling proxy"
        );

        for ordinal in 0..self.settings.sample_count {
            let key = sample_key(&self.settings.key_prefix, ordinal);
            let partition_id = route(&key);
            let server_address = index.resolve(partition_id).to_string();

            let (latency, error) = match client
                .measure_round_trip(&key, self.settings.payload_size)
                .await
            {
                Ok(latency) => {
                    metrics::record_probe(proxy_address, latency);
                    (latency, None)
                }
                Err(e) => {
                    failures += 1;
                    tracing::debug!(proxy = %proxy_address, key = %key, error = %e, "Probe failed");
                    metrics::record_probe_failure(proxy_address);
                    (self.settings.failure_latency(), Some(e.to_string()))
                }
            };

            observations.push(Observation {
                key,
                partition_id,
                proxy_address: proxy_address.to_string(),
                server_address,
                latency,
                error,
            });
        }

        if failures > 0 {
            tracing::warn!(
                proxy = %proxy_address,
                failures,
                total = observations.len(),
                "Probes failed; recorded with failure latency"
            );
        }

        observations
    }

    /// Sample every proxy in the snapshot and merge the results in snapshot
    /// proxy order.
    pub async fn sample_all(&self, snapshot: &TopologySnapshot) -> Vec<Observation> {
        let per_proxy: Vec<Vec<Observation>> = if self.settings.parallel_proxies {
            join_all(
                snapshot
                    .proxies
                    .iter()
                    .map(|proxy| self.sample(&proxy.address, snapshot)),
            )
            .await
        } else {
            let mut per_proxy = Vec::with_capacity(snapshot.proxies.len());
            for proxy in &snapshot.proxies {
                per_proxy.push(self.sample(&proxy.address, snapshot).await);
            }
            per_proxy
        };

        per_proxy.into_iter().flatten().collect()
    }
}
