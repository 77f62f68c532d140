//! Configuration module
//!
//! This module handles the configuration file types and loading
//! for the calculator server.

mod defaults;
mod loading;
mod types;
mod validation;

// Re-export public types
pub use loading::{ConfigSource, create_default_config, load_config, load_config_with_fallback};
pub use types::{Config, DiscoveryConfig, ServerConfig, StatsConfig};

// Re-export default functions for use in tests and other modules
pub use defaults::{discovery_enabled, report_interval};
