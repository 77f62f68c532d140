//! Configuration loading from files
//!
//! A missing config file is not an error: the server falls back to defaults
//! and records where its settings came from.

use anyhow::Result;
use std::path::Path;

use super::types::Config;

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from the named file
    File(String),
    /// Built-in defaults (file absent)
    Defaults,
}

impl ConfigSource {
    /// Human-readable description for startup logs
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::File(path) => format!("config file '{}'", path),
            Self::Defaults => "built-in defaults".to_string(),
        }
    }
}

/// Load configuration from a TOML file
///
/// # Errors
/// Returns error if the file cannot be read, does not parse, or fails validation
pub fn load_config(config_path: &str) -> Result<Config> {
    let config_content = std::fs::read_to_string(config_path)
        .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", config_path, e))?;

    let config: Config = toml::from_str(&config_content)
        .map_err(|e| anyhow::anyhow!("Failed to parse config file '{}': {}", config_path, e))?;

    // Validate the loaded configuration
    config.validate()?;

    Ok(config)
}

/// Load configuration, falling back to defaults when the file does not exist
///
/// An existing but malformed file is still an error.
///
/// # Errors
/// Returns error if the file exists but cannot be loaded
pub fn load_config_with_fallback(config_path: &str) -> Result<(Config, ConfigSource)> {
    if Path::new(config_path).exists() {
        let config = load_config(config_path)?;
        return Ok((config, ConfigSource::File(config_path.to_string())));
    }

    tracing::debug!(
        "Config file '{}' not found, using built-in defaults",
        config_path
    );
    Ok((create_default_config(), ConfigSource::Defaults))
}

/// Create a default configuration for examples/testing
#[must_use]
pub fn create_default_config() -> Config {
    Config::default()
}
