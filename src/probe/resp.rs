//! RESP (Redis protocol) probe client.
//!
//! Times a `SET <key> <payload>` round trip over TCP. The connection is
//! opened lazily, reused across probes, and dropped after any failure so
//! the next probe reconnects. A target that cannot be connected to is not
//! dialed again by the same client: later probes fail immediately.

use std::time::{Duration, Instant};

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufStream};
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::probe::client::{ProbeClient, ProbeConnector, ProbeError, ProbeResult};

/// Creates [`RespProbeClient`]s with a shared timeout.
#[derive(Debug, Clone)]
pub struct RespConnector {
    timeout: Duration,
}

impl RespConnector {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl ProbeConnector for RespConnector {
    type Client = RespProbeClient;

    fn client(&self, address: &str) -> RespProbeClient {
        RespProbeClient::new(address, self.timeout)
    }
}

/// A RESP client bound to one address.
#[derive(Debug)]
pub struct RespProbeClient {
    address: String,
    timeout: Duration,
    stream: Option<BufStream<TcpStream>>,
    payload: Vec<u8>,
    connect_failure: Option<String>,
}

impl RespProbeClient {
    pub fn new(address: impl Into<String>, timeout: Duration) -> Self {
        Self {
            address: address.into(),
            timeout,
            stream: None,
            payload: Vec::new(),
            connect_failure: None,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    async fn connect(&mut self) -> ProbeResult<()> {
        if self.stream.is_some() {
            return Ok(());
        }
        if let Some(cause) = &self.connect_failure {
            return Err(ProbeError::Unreachable {
                address: self.address.clone(),
                cause: cause.clone(),
            });
        }

        let connected = timeout(self.timeout, TcpStream::connect(&self.address)).await;
        let err = match connected {
            Ok(Ok(stream)) => return self.established(stream),
            Ok(Err(source)) => ProbeError::Connect {
                address: self.address.clone(),
                source,
            },
            Err(_) => ProbeError::Timeout {
                address: self.address.clone(),
                after: self.timeout,
            },
        };

        tracing::warn!(address = %self.address, error = %err, "Probe target unreachable");
        self.connect_failure = Some(err.to_string());
        Err(err)
    }

    fn established(&mut self, stream: TcpStream) -> ProbeResult<()> {
        stream.set_nodelay(true).map_err(|source| ProbeError::Io {
            address: self.address.clone(),
            source,
        })?;

        tracing::debug!(address = %self.address, "Probe connection established");
        self.stream = Some(BufStream::new(stream));
        Ok(())
    }

    async fn set(&mut self, key: &str, payload_size: usize) -> ProbeResult<Duration> {
        self.connect().await?;

        if self.payload.len() != payload_size {
            self.payload = vec![b'x'; payload_size];
        }
        let command = encode_command(&[b"SET".as_slice(), key.as_bytes(), self.payload.as_slice()]);

        let address = self.address.clone();
        let limit = self.timeout;
        let Some(stream) = self.stream.as_mut() else {
            return Err(ProbeError::Protocol {
                address,
                message: "connection not established".into(),
            });
        };

        let start = Instant::now();
        let exchange = async {
            stream.write_all(&command).await?;
            stream.flush().await?;
            let mut line = String::new();
            let n = stream.read_line(&mut line).await?;
            Ok::<_, std::io::Error>((n, line))
        };

        let (n, line) = match timeout(limit, exchange).await {
            Ok(Ok(reply)) => reply,
            Ok(Err(source)) => return Err(ProbeError::Io { address, source }),
            Err(_) => return Err(ProbeError::Timeout { address, after: limit }),
        };
        let elapsed = start.elapsed();

        if n == 0 {
            return Err(ProbeError::Io {
                address,
                source: std::io::ErrorKind::UnexpectedEof.into(),
            });
        }
        parse_simple_reply(&address, &line)?;
        Ok(elapsed)
    }
}

impl ProbeClient for RespProbeClient {
    async fn measure_round_trip(&mut self, key: &str, payload_size: usize) -> ProbeResult<Duration> {
        let result = self.set(key, payload_size).await;
        if result.is_err() {
            // Connection state is unknown after a failure.
            self.stream = None;
        }
        result
    }
}

/// Encode a command as a RESP array of bulk strings.
pub fn encode_command(args: &[&[u8]]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(16 + args.iter().map(|a| a.len() + 16).sum::<usize>());
    buf.extend_from_slice(format!("*{}\r\n", args.len()).as_bytes());
    for arg in args {
        buf.extend_from_slice(format!("${}\r\n", arg.len()).as_bytes());
        buf.extend_from_slice(arg);
        buf.extend_from_slice(b"\r\n");
    }
    buf
}

/// Accept a status or integer reply; map error replies to [`ProbeError::Reply`].
fn parse_simple_reply(address: &str, line: &str) -> ProbeResult<()> {
    let line = line.trim_end_matches(['\r', '\n']);
    match line.as_bytes().first() {
        Some(b'+') | Some(b':') => Ok(()),
        Some(b'-') => Err(ProbeError::Reply {
            address: address.to_string(),
            message: line[1..].to_string(),
        }),
        _ => Err(ProbeError::Protocol {
            address: address.to_string(),
            message: format!("{:?}", line),
        }),
    }
}
