//! Validated string types that enforce invariants at construction time

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Validation errors for configuration values
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("hostname cannot be empty or whitespace")]
    EmptyHostName,

    #[error("port cannot be 0")]
    InvalidPort,

    #[error("invalid port number: {0}")]
    InvalidPortNumber(String),
}

/// A bind host that cannot be empty or whitespace-only
///
/// # Examples
/// ```
/// use ccs::types::HostName;
///
/// let host = HostName::new("0.0.0.0".to_string()).unwrap();
/// assert_eq!(host.as_str(), "0.0.0.0");
///
/// assert!(HostName::new("  ".to_string()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct HostName(String);

impl HostName {
    /// Listen on every interface
    pub const ANY: &'static str = "0.0.0.0";

    /// Create a new HostName after validation
    pub fn new(host: String) -> Result<Self, ValidationError> {
        if host.trim().is_empty() {
            return Err(ValidationError::EmptyHostName);
        }
        Ok(Self(host))
    }

    /// Get the HostName as a string slice
    #[must_use]
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for HostName {
    fn default() -> Self {
        Self(Self::ANY.to_string())
    }
}

impl AsRef<str> for HostName {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HostName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for HostName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl<'de> Deserialize<'de> for HostName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hostname_valid() {
        let host = HostName::new("127.0.0.1".to_string()).unwrap();
        assert_eq!(host.as_str(), "127.0.0.1");
    }

    #[test]
    fn test_hostname_whitespace_rejected() {
        assert_eq!(
            HostName::new(" \t\n ".to_string()),
            Err(ValidationError::EmptyHostName)
        );
    }

    #[test]
    fn test_hostname_default_is_any() {
        assert_eq!(HostName::default().as_str(), "0.0.0.0");
    }

    #[test]
    fn test_hostname_parse() {
        let host: HostName = "localhost".parse().unwrap();
        assert_eq!(host.to_string(), "localhost");
        assert!("".parse::<HostName>().is_err());
    }

    #[test]
    fn test_hostname_deserialize_rejects_empty() {
        #[derive(Deserialize)]
        struct Wrapper {
            #[allow(dead_code)]
            host: HostName,
        }
        assert!(toml::from_str::<Wrapper>("host = \"\"").is_err());
        assert!(toml::from_str::<Wrapper>("host = \"::1\"").is_ok());
    }
}
