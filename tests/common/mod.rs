//! Shared utilities for integration testing.

use std::future::Future;
use std::io::Write;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

/// Start a mock RESP proxy that answers every `SET` with `+OK`.
pub async fn start_mock_proxy() -> SocketAddr {
    start_programmable_proxy(|_key| async { "+OK\r\n".to_string() }).await
}

/// Start a programmable mock RESP proxy.
///
/// `f` receives the key of each command and returns the raw reply; it may
/// sleep first to simulate latency.
pub async fn start_programmable_proxy<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = String> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let (read, mut write) = socket.into_split();
                        let mut reader = BufReader::new(read);
                        while let Some(args) = read_command(&mut reader).await {
                            let key = args.get(1).cloned().unwrap_or_default();
                            let reply = f(key).await;
                            if write.write_all(reply.as_bytes()).await.is_err() {
                                break;
                            }
                        }
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Read one RESP array of bulk strings; `None` on EOF or malformed input.
async fn read_command<R: AsyncBufReadExt + AsyncReadExt + Unpin>(reader: &mut R) -> Option<Vec<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line).await.ok()? == 0 {
        return None;
    }
    let count: usize = line.trim_end().strip_prefix('*')?.parse().ok()?;

    let mut args = Vec::with_capacity(count);
    for _ in 0..count {
        line.clear();
        reader.read_line(&mut line).await.ok()?;
        let len: usize = line.trim_end().strip_prefix('$')?.parse().ok()?;
        let mut data = vec![0u8; len + 2];
        reader.read_exact(&mut data).await.ok()?;
        data.truncate(len);
        args.push(String::from_utf8_lossy(&data).into_owned());
    }
    Some(args)
}

/// Write a topology snapshot file with one group per server, spreading all
/// 1024 partitions round-robin over the groups.
#[allow(dead_code)]
pub fn write_topology(proxies: &[SocketAddr], servers: &[&str]) -> tempfile::NamedTempFile {
    let mut toml = String::new();
    for (i, server) in servers.iter().enumerate() {
        toml.push_str(&format!(
            "[[groups]]\ngroup_id = {}\nmembers = [{{ address = \"{}\", role = \"master\" }}]\n\n",
            i + 1,
            server
        ));
    }
    for proxy in proxies {
        toml.push_str(&format!("[[proxies]]\naddress = \"{}\"\n\n", proxy));
    }
    for partition in 0..1024 {
        toml.push_str(&format!(
            "[[partitions]]\npartition_id = {}\ngroup_id = {}\n\n",
            partition,
            partition as usize % servers.len() + 1
        ));
    }

    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(toml.as_bytes()).unwrap();
    file
}
