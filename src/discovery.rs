//! UDP discovery responder
//!
//! Answers `CCS DISCOVER` probes with `CCS FOUND` on the same port number as
//! the TCP listener. Runs independently of the accept loop; a socket error
//! ends the responder but leaves TCP service untouched.

use crate::connection_error::ConnectionError;
use crate::constants::buffer::DATAGRAM;
use crate::protocol::{DISCOVER_REPLY, is_discovery_probe};
use std::net::SocketAddr;
use tokio::net::UdpSocket;
use tracing::{debug, info};

/// Reply payload for a received datagram, if it deserves one
#[must_use]
pub fn reply_for(payload: &[u8]) -> Option<&'static [u8]> {
    is_discovery_probe(payload).then_some(DISCOVER_REPLY.as_bytes())
}

/// Bound discovery socket
#[derive(Debug)]
pub struct DiscoveryResponder {
    socket: UdpSocket,
}

impl DiscoveryResponder {
    /// Bind the discovery socket
    ///
    /// # Errors
    /// Returns [`ConnectionError::Bind`] if the address is unavailable
    pub async fn bind(addr: SocketAddr) -> Result<Self, ConnectionError> {
        let socket = UdpSocket::bind(addr)
            .await
            .map_err(|source| ConnectionError::Bind {
                protocol: "UDP",
                address: addr.to_string(),
                source,
            })?;
        Ok(Self { socket })
    }

    /// Address the socket is bound to
    ///
    /// # Errors
    /// Returns the OS error if the socket address cannot be read
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Answer probes until a socket error occurs
    ///
    /// # Errors
    /// Returns [`ConnectionError::Discovery`] on the first receive or send failure
    pub async fn run(self) -> Result<(), ConnectionError> {
        let mut buf = [0u8; DATAGRAM];

        if let Ok(addr) = self.socket.local_addr() {
            info!("Discovery responder listening on {} (UDP)", addr);
        }

        loop {
            let (len, peer) = self
                .socket
                .recv_from(&mut buf)
                .await
                .map_err(ConnectionError::Discovery)?;

            match reply_for(&buf[..len]) {
                Some(reply) => {
                    self.socket
                        .send_to(reply, peer)
                        .await
                        .map_err(ConnectionError::Discovery)?;
                    debug!("Answered discovery probe from {}", peer);
                }
                None => {
                    debug!(
                        "Ignoring {} byte datagram from {}: {:?}",
                        len,
                        peer,
                        String::from_utf8_lossy(&buf[..len])
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_reply_for_probe() {
        assert_eq!(reply_for(b"CCS DISCOVER"), Some(&b"CCS FOUND"[..]));
        assert_eq!(reply_for(b"  CCS DISCOVER\n"), Some(&b"CCS FOUND"[..]));
    }

    #[test]
    fn test_no_reply_for_other_payloads() {
        assert_eq!(reply_for(b""), None);
        assert_eq!(reply_for(b"CCS FOUND"), None);
        assert_eq!(reply_for(b"ccs discover"), None);
        assert_eq!(reply_for(b"HELLO CCS DISCOVER"), None);
    }

    #[tokio::test]
    async fn test_responder_answers_sender() {
        let responder = DiscoveryResponder::bind("127.0.0.1:0".parse().unwrap())
            .await
            .unwrap();
        let server_addr = responder.local_addr().unwrap();
        let handle = tokio::spawn(responder.run());

        let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        client.send_to(b"CCS DISCOVER", server_addr).await.unwrap();

        let mut buf = [0u8; 64];
        let (len, from) = tokio::time::timeout(Duration::from_secs(2), client.recv_from(&mut buf))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(&buf[..len], b"CCS FOUND");
        assert_eq!(from, server_addr);

        handle.abort();
    }

    #[tokio::test]
    async fn test_responder_ignores_garbage() {
        let responder = DiscoveryResponder::bind("127.0.0.1:0".parse().unwrap())
            .await
            .unwrap();
        let server_addr = responder.local_addr().unwrap();
        let handle = tokio::spawn(responder.run());

        let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        client.send_to(b"HELLO", server_addr).await.unwrap();

        let mut buf = [0u8; 64];
        let result =
            tokio::time::timeout(Duration::from_millis(200), client.recv_from(&mut buf)).await;
        assert!(result.is_err(), "garbage must not be answered");

        handle.abort();
    }

    #[tokio::test]
    async fn test_bind_conflict_is_bind_error() {
        let first = DiscoveryResponder::bind("127.0.0.1:0".parse().unwrap())
            .await
            .unwrap();
        let taken = first.local_addr().unwrap();

        let err = DiscoveryResponder::bind(taken).await.unwrap_err();
        assert!(matches!(err, ConnectionError::Bind { protocol: "UDP", .. }));
    }
}
