//! Probe client seam.
//!
//! # Responsibilities
//! - Define how a timed write against one target address is performed
//! - Define the errors such a write can produce
//!
//! # Design Decisions
//! - One client per target; the sampler owns it for the whole key population
//! - Timeouts live in the client, not in the sampler

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

/// Errors a single probe can fail with.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// TCP connect failed.
    #[error("connect to {address} failed: {source}")]
    Connect {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// Connect or round trip exceeded the deadline.
    #[error("{address} did not answer within {after:?}")]
    Timeout { address: String, after: Duration },

    /// An earlier connect to this target already failed; not redialed.
    #[error("{address} unreachable: {cause}")]
    Unreachable { address: String, cause: String },

    /// Read or write failed on an established connection.
    #[error("I/O error talking to {address}: {source}")]
    Io {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// The target answered with an error reply.
    #[error("{address} replied with error: {message}")]
    Reply { address: String, message: String },

    /// The target answered with something that is not a valid reply.
    #[error("unexpected reply from {address}: {message}")]
    Protocol { address: String, message: String },
}

/// Result type for probe operations.
pub type ProbeResult<T> = Result<T, ProbeError>;

/// A client bound to one target address.
pub trait ProbeClient {
    /// Write `payload_size` bytes under `key` and return the elapsed
    /// wall-clock time of the round trip.
    fn measure_round_trip(
        &mut self,
        key: &str,
        payload_size: usize,
    ) -> impl Future<Output = ProbeResult<Duration>> + Send;
}

/// Factory of probe clients, one per proxy.
pub trait ProbeConnector {
    type Client: ProbeClient + Send;

    /// Create a client for `address`. Connecting may be deferred to the
    /// first probe.
    fn client(&self, address: &str) -> Self::Client;
}
