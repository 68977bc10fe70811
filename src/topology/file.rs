//! File-backed topology provider.
//!
//! Reads a whole `TopologySnapshot` from disk. Files ending in `.json` are
//! parsed as JSON, everything else as TOML. The file is read once per
//! provider; the three topology reads all answer from that one parse.

use std::path::{Path, PathBuf};

use tokio::sync::OnceCell;

use crate::topology::provider::TopologyProvider;
use crate::topology::types::{
    PartitionAssignment, Proxy, ServerGroup, TopologyError, TopologyResult, TopologySnapshot,
};

/// Topology provider reading a snapshot file.
#[derive(Debug, Clone)]
pub struct FileProvider {
    path: PathBuf,
    snapshot: OnceCell<TopologySnapshot>,
}

impl FileProvider {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            snapshot: OnceCell::new(),
        }
    }

    /// The parsed snapshot, loading it on first use.
    ///
    /// A failed load is not cached.
    async fn cached(&self) -> TopologyResult<&TopologySnapshot> {
        self.snapshot.get_or_try_init(|| self.load()).await
    }

    /// Read and decode the snapshot file.
    pub async fn load(&self) -> TopologyResult<TopologySnapshot> {
        let display = self.path.display().to_string();
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| TopologyError::Io {
                path: display.clone(),
                source,
            })?;

        let is_json = self
            .path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let decoded = if is_json {
            serde_json::from_str(&content).map_err(|e| e.to_string())
        } else {
            toml::from_str(&content).map_err(|e| e.to_string())
        };

        decoded.map_err(|message| TopologyError::Decode {
            source_name: display,
            message,
        })
    }
}

impl TopologyProvider for FileProvider {
    async fn server_groups(&self) -> TopologyResult<Vec<ServerGroup>> {
        Ok(self.cached().await?.groups.clone())
    }

    async fn proxies(&self) -> TopologyResult<Vec<Proxy>> {
        Ok(self.cached().await?.proxies.clone())
    }

    async fn partitions(&self) -> TopologyResult<Vec<PartitionAssignment>> {
        Ok(self.cached().await?.partitions.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::provider::fetch_snapshot;
    use crate::topology::types::MemberRole;
    use std::io::Write;

    const TOML_SNAPSHOT: &str = r#"
[[groups]]
group_id = 1
members = [
    { address = "10.0.0.1:6379", role = "master" },
    { address = "10.0.0.2:6379", role = "slave" },
]

[[proxies]]
address = "10.0.1.1:19000"

[[partitions]]
partition_id = 0
group_id = 1
"#;

    #[tokio::test]
    async fn test_load_toml_snapshot() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(TOML_SNAPSHOT.as_bytes()).unwrap();

        let snapshot = fetch_snapshot(&FileProvider::new(file.path())).await.unwrap();
        assert_eq!(snapshot.groups[0].members[1].role, MemberRole::Other);
        assert_eq!(snapshot.proxies[0].address, "10.0.1.1:19000");
        assert_eq!(snapshot.partitions[0].group_id, 1);
    }

    #[tokio::test]
    async fn test_load_json_snapshot_with_dashboard_names() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(
            br#"{
                "groups": [{"id": 2, "servers": [{"addr": "s:1", "type": "master"}]}],
                "proxies": [{"addr": "p:1", "id": "proxy_1", "state": "online"}],
                "partitions": [{"id": 5, "group_id": 2}]
            }"#,
        )
        .unwrap();

        let snapshot = FileProvider::new(file.path()).load().await.unwrap();
        assert_eq!(snapshot.groups[0].group_id, 2);
        assert_eq!(snapshot.proxies[0].id.as_deref(), Some("proxy_1"));
        assert_eq!(snapshot.partitions[0].partition_id, 5);
    }

    #[tokio::test]
    async fn test_reads_share_one_parse() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(TOML_SNAPSHOT.as_bytes()).unwrap();
        let provider = FileProvider::new(file.path());

        let groups = provider.server_groups().await.unwrap();
        std::fs::write(file.path(), "[[proxies]]\naddress = \"10.9.9.9:19000\"\n").unwrap();

        let proxies = provider.proxies().await.unwrap();
        let partitions = provider.partitions().await.unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(proxies[0].address, "10.0.1.1:19000");
        assert_eq!(partitions.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_load_is_retried() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("topology.toml");
        let provider = FileProvider::new(&path);

        assert!(provider.proxies().await.is_err());
        std::fs::write(&path, TOML_SNAPSHOT).unwrap();
        assert_eq!(provider.proxies().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_decode_error() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = FileProvider::new(file.path()).load().await.unwrap_err();
        assert!(matches!(err, TopologyError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = FileProvider::new("/nonexistent/topology.toml")
            .load()
            .await
            .unwrap_err();
        assert!(matches!(err, TopologyError::Io { .. }));
    }
}
