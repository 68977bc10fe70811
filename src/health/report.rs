//! Health report and its renderings.

use std::fmt;
use std::io::{self, Write};

use serde::Serialize;

use crate::health::classifier::HealthStatus;
use crate::health::role::Role;
use crate::probe::Observation;

/// Final classification of one address.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthEntry {
    pub address: String,
    pub role: Role,
    /// `None` when the bucket had no samples.
    pub average_ms: Option<f64>,
    pub samples: usize,
    /// Samples above the per-sample slow limit.
    pub slow_samples: usize,
    pub status: HealthStatus,
}

/// Summary line: `server <addr> latency: <ms> ms and status <status>`.
///
/// Every address uses the `server` prefix, proxies included.
impl fmt::Display for HealthEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.average_ms {
            Some(avg) => write!(
                f,
                "server {} latency: {:.6} ms and status {}",
                self.address, avg, self.status
            ),
            None => write!(
                f,
                "server {} latency: n/a ms and status {}",
                self.address, self.status
            ),
        }
    }
}

/// Ordered classification result: servers first, then proxies.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HealthReport {
    pub entries: Vec<HealthEntry>,
    pub any_server_down: bool,
}

impl HealthReport {
    pub fn entry(&self, address: &str) -> Option<&HealthEntry> {
        self.entries.iter().find(|e| e.address == address)
    }

    pub fn by_role(&self, role: Role) -> impl Iterator<Item = &HealthEntry> {
        self.entries.iter().filter(move |e| e.role == role)
    }

    /// Count of entries with the given status.
    pub fn count(&self, status: HealthStatus) -> usize {
        self.entries.iter().filter(|e| e.status == status).count()
    }

    /// Write one summary line per address.
    pub fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for entry in &self.entries {
            writeln!(out, "{}", entry)?;
        }
        Ok(())
    }

    /// Write the report as one JSON document.
    pub fn write_json<W: Write>(&self, out: &mut W) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)
    }
}

/// Write one verbose line per observation.
pub fn write_observations<W: Write>(observations: &[Observation], out: &mut W) -> io::Result<()> {
    for obs in observations {
        writeln!(out, "{}", obs)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(address: &str, role: Role, avg: Option<f64>, status: HealthStatus) -> HealthEntry {
        HealthEntry {
            address: address.into(),
            role,
            average_ms: avg,
            samples: 1,
            slow_samples: 0,
            status,
        }
    }

    #[test]
    fn test_summary_lines() {
        let report = HealthReport {
            entries: vec![
                entry("10.0.0.1:6379", Role::Server, Some(1.5), HealthStatus::Normal),
                entry("10.0.0.9:19000", Role::Proxy, None, HealthStatus::Unknown),
            ],
            any_server_down: false,
        };

        let mut out = Vec::new();
        report.write_text(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "server 10.0.0.1:6379 latency: 1.500000 ms and status normal\n\
             server 10.0.0.9:19000 latency: n/a ms and status unknown\n"
        );
    }

    #[test]
    fn test_json_document() {
        let report = HealthReport {
            entries: vec![entry("s:1", Role::Server, Some(3000.0), HealthStatus::Down)],
            any_server_down: true,
        };

        let mut out = Vec::new();
        report.write_json(&mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["any_server_down"], true);
        assert_eq!(value["entries"][0]["status"], "down");
        assert_eq!(value["entries"][0]["role"], "server");
        assert_eq!(report.count(HealthStatus::Down), 1);
        assert_eq!(report.by_role(Role::Proxy).count(), 0);
    }
}
