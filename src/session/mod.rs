//! Client session management
//!
//! A session owns one accepted connection for its whole life:
//! `Open → (read line → evaluate → respond)* → Closed`. Failures inside a
//! session are logged and end only that session.

mod handler;

pub use handler::SessionSummary;

use crate::metrics::StatsAggregator;
use crate::types::ClientId;
use std::net::SocketAddr;

/// Represents an active client session
#[derive(Debug)]
pub struct ClientSession {
    client_id: ClientId,
    client_addr: SocketAddr,
    stats: StatsAggregator,
}

impl ClientSession {
    /// Create a new client session
    #[must_use]
    pub fn new(client_addr: SocketAddr, stats: StatsAggregator) -> Self {
        Self {
            client_id: ClientId::new(),
            client_addr,
            stats,
        }
    }

    /// Unique identifier for this session
    #[must_use]
    #[inline]
    pub fn client_id(&self) -> ClientId {
        self.client_id
    }

    /// Peer address
    #[must_use]
    #[inline]
    pub fn client_addr(&self) -> SocketAddr {
        self.client_addr
    }
}
