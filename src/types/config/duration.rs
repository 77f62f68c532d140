//! Duration serialization helpers for configuration files

use serde::{Deserialize, Deserializer, Serializer};
use std::time::Duration;

/// Helper for deserializing Duration from seconds
///
/// TOML configs specify durations in seconds, so we need
/// custom serde to convert from u64 seconds to Duration
pub mod duration_serde {
    use super::*;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Like [`duration_serde`] but rejects `0` at parse time
pub mod nonzero_duration_serde {
    use super::*;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        super::duration_serde::serialize(duration, serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        if secs == 0 {
            return Err(serde::de::Error::custom("duration must be at least 1 second"));
        }
        Ok(Duration::from_secs(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Plain {
        #[serde(with = "duration_serde")]
        every: Duration,
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Strict {
        #[serde(with = "nonzero_duration_serde")]
        every: Duration,
    }

    #[test]
    fn test_duration_from_seconds() {
        let parsed: Plain = toml::from_str("every = 10").unwrap();
        assert_eq!(parsed.every, Duration::from_secs(10));
    }

    #[test]
    fn test_duration_serializes_as_seconds() {
        let text = toml::to_string(&Plain {
            every: Duration::from_secs(42),
        })
        .unwrap();
        assert!(text.contains("every = 42"));
    }

    #[test]
    fn test_plain_duration_accepts_zero() {
        let parsed: Plain = toml::from_str("every = 0").unwrap();
        assert_eq!(parsed.every, Duration::ZERO);
    }

    #[test]
    fn test_nonzero_duration_rejects_zero() {
        let result: Result<Strict, _> = toml::from_str("every = 0");
        assert!(result.is_err());
    }
}
