//! Core types for configuration and client identification

pub mod config;
pub mod validated;

pub use config::{Port, ThreadCount, duration_serde, nonzero_duration_serde};
pub use validated::{HostName, ValidationError};

use uuid::Uuid;

/// Unique identifier for client sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientId(Uuid);

impl ClientId {
    /// Generate a new unique client ID
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// First eight hex characters, for log lines
    #[must_use]
    pub fn short(&self) -> String {
        crate::formatting::short_id(&self.0)
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
