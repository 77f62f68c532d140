//! Demo client: broadcast discovery and a line-oriented request helper

use crate::constants::client::OPERAND_RANGE;
use crate::constants::discovery::BROADCAST_ADDR;
use crate::protocol::{DISCOVER_PROBE, Operation, is_discovery_reply};
use anyhow::{Context, Result};
use rand::Rng;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpStream, UdpSocket};
use tracing::debug;

/// Broadcast a discovery probe on `port` and wait for a `CCS FOUND` reply
///
/// Returns the responder's address, or `None` if nothing answered in time.
///
/// # Errors
/// Returns error if the probe socket cannot be created or the probe cannot be sent
pub async fn discover_server(port: u16, timeout: Duration) -> Result<Option<SocketAddr>> {
    discover_server_at(IpAddr::V4(BROADCAST_ADDR), port, timeout).await
}

/// Like [`discover_server`] but sends the probe to `target` instead of broadcasting
///
/// # Errors
/// Returns error if the probe socket cannot be created or the probe cannot be sent
pub async fn discover_server_at(
    target: IpAddr,
    port: u16,
    timeout: Duration,
) -> Result<Option<SocketAddr>> {
    let bind_ip = match target {
        IpAddr::V4(ip) if ip.is_loopback() => IpAddr::V4(Ipv4Addr::LOCALHOST),
        _ => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
    };
    let socket = UdpSocket::bind(SocketAddr::new(bind_ip, 0))
        .await
        .context("Failed to bind discovery socket")?;
    socket
        .set_broadcast(true)
        .context("Failed to enable broadcast")?;

    let destination = SocketAddr::new(target, port);
    socket
        .send_to(DISCOVER_PROBE.as_bytes(), destination)
        .await
        .with_context(|| format!("Failed to send discovery probe to {}", destination))?;
    debug!("Sent discovery probe to {}", destination);

    let mut buf = [0u8; 64];
    let wait_for_reply = async {
        loop {
            let (len, from) = socket.recv_from(&mut buf).await?;
            if is_discovery_reply(&buf[..len]) {
                return Ok::<_, std::io::Error>(from);
            }
            debug!("Ignoring unexpected datagram from {}", from);
        }
    };

    match tokio::time::timeout(timeout, wait_for_reply).await {
        Ok(reply) => Ok(Some(reply.context("Failed waiting for discovery reply")?)),
        Err(_) => Ok(None),
    }
}

/// Generate one random request line (without terminator)
///
/// Operands are drawn from `[-10, 9]`; a DIV never gets a zero divisor.
pub fn random_request<R: Rng>(rng: &mut R) -> String {
    let operation = Operation::ALL[rng.gen_range(0..Operation::ALL.len())];
    let lhs = rng.gen_range(OPERAND_RANGE);
    let mut rhs = rng.gen_range(OPERAND_RANGE);
    if operation == Operation::Div && rhs == 0 {
        rhs = 1;
    }
    format!("{} {} {}", operation, lhs, rhs)
}

/// TCP connection to a calculator server
#[derive(Debug)]
pub struct CalculatorClient {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
    peer: SocketAddr,
}

impl CalculatorClient {
    /// Connect to a server
    ///
    /// # Errors
    /// Returns error if the TCP connection cannot be established
    pub async fn connect(addr: SocketAddr) -> Result<Self> {
        let stream = TcpStream::connect(addr)
            .await
            .with_context(|| format!("Failed to connect to {}", addr))?;
        let (read_half, writer) = stream.into_split();
        Ok(Self {
            reader: BufReader::new(read_half),
            writer,
            peer: addr,
        })
    }

    /// Server address
    #[must_use]
    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    /// Send one request line and read exactly one response line
    ///
    /// The returned response has its line terminator removed.
    ///
    /// # Errors
    /// Returns error on I/O failure or if the server closed the connection
    pub async fn request(&mut self, line: &str) -> Result<String> {
        self.writer
            .write_all(format!("{}\n", line).as_bytes())
            .await
            .context("Failed to send request")?;

        let mut response = String::new();
        let n = self
            .reader
            .read_line(&mut response)
            .await
            .context("Failed to read response")?;
        if n == 0 {
            anyhow::bail!("Server {} closed the connection", self.peer);
        }

        Ok(response.trim_end_matches(['\r', '\n']).to_string())
    }
}
