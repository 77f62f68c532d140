//! Connection error types for the calculator service
//!
//! This module classifies socket failures so callers can decide how loudly
//! to log them and which loop they terminate.

use std::fmt;
use std::io;
use tracing::{Level, debug, error, warn};

/// Errors that can occur on the service's sockets
#[derive(Debug)]
#[non_exhaustive]
pub enum ConnectionError {
    /// Binding the TCP listener or UDP socket failed
    Bind {
        protocol: &'static str,
        address: String,
        source: io::Error,
    },

    /// `accept()` on the TCP listener failed; ends the accept loop
    Accept(io::Error),

    /// Receiving or replying on the discovery socket failed; ends the responder
    Discovery(io::Error),

    /// Reading a request line from a client failed
    Read(io::Error),

    /// Writing a response line to a client failed
    Write(io::Error),
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bind {
                protocol,
                address,
                source,
            } => {
                write!(
                    f,
                    "Failed to bind {} socket on {}: {}",
                    protocol, address, source
                )
            }
            Self::Accept(e) => write!(f, "Failed to accept connection: {}", e),
            Self::Discovery(e) => write!(f, "Discovery socket error: {}", e),
            Self::Read(e) => write!(f, "Failed to read from client: {}", e),
            Self::Write(e) => write!(f, "Failed to write to client: {}", e),
        }
    }
}

impl std::error::Error for ConnectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.io_error())
    }
}

impl ConnectionError {
    /// The underlying I/O error
    #[must_use]
    pub fn io_error(&self) -> &io::Error {
        match self {
            Self::Bind { source, .. } => source,
            Self::Accept(e) | Self::Discovery(e) | Self::Read(e) | Self::Write(e) => e,
        }
    }

    /// Check if this is the peer going away mid-session
    #[must_use]
    pub fn is_client_disconnect(&self) -> bool {
        matches!(self, Self::Read(_) | Self::Write(_))
            && matches!(
                self.io_error().kind(),
                io::ErrorKind::BrokenPipe
                    | io::ErrorKind::ConnectionReset
                    | io::ErrorKind::ConnectionAborted
                    | io::ErrorKind::UnexpectedEof
            )
    }

    /// Check if this error stops a whole loop rather than one session
    #[must_use]
    pub const fn is_fatal_to_loop(&self) -> bool {
        matches!(
            self,
            Self::Bind { .. } | Self::Accept(_) | Self::Discovery(_)
        )
    }

    /// Get the appropriate log level for this error
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.is_client_disconnect() {
            // Peers hanging up is routine
            tracing::Level::DEBUG
        } else if self.is_fatal_to_loop() {
            tracing::Level::ERROR
        } else {
            tracing::Level::WARN
        }
    }
}

/// Log `err` at the level [`ConnectionError::log_level`] picks for it
///
/// Returns the level used.
pub fn log_connection_error(context: impl fmt::Display, err: &ConnectionError) -> Level {
    let level = err.log_level();
    if level == Level::DEBUG {
        debug!("{}: {}", context, err);
    } else if level == Level::ERROR {
        error!("{}: {}", context, err);
    } else {
        warn!("{}: {}", context, err);
    }
    level
}
