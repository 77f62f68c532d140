//! Configuration type definitions
//!
//! This module contains the configuration structures read from `ccs.toml`.

use crate::types::{HostName, ThreadCount, nonzero_duration_serde};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main server configuration
///
/// Every section is optional; an empty file yields [`Config::default`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct Config {
    /// Listener settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Statistics reporting
    #[serde(default)]
    pub stats: StatsConfig,
    /// UDP discovery responder
    #[serde(default)]
    pub discovery: DiscoveryConfig,
}

/// Listener settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Host/IP to bind to (default: 0.0.0.0)
    pub host: HostName,
    /// Number of worker threads (default: one per CPU)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<ThreadCount>,
}

/// Statistics reporting settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatsConfig {
    /// Seconds between reports; the interval counters reset after each one
    #[serde(
        with = "nonzero_duration_serde",
        default = "super::defaults::report_interval"
    )]
    pub report_interval: Duration,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            report_interval: super::defaults::report_interval(),
        }
    }
}

/// Discovery responder settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiscoveryConfig {
    /// Answer `CCS DISCOVER` probes on the listening port
    #[serde(default = "super::defaults::discovery_enabled")]
    pub enabled: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            enabled: super::defaults::discovery_enabled(),
        }
    }
}
