//! Configuration validation
//!
//! This module provides validation logic for the configuration to ensure
//! all settings are valid before the server starts.

use anyhow::Result;
use std::time::Duration;

use super::types::Config;

/// Reports this far apart are rarely what anyone wants
const MAX_RECOMMENDED_REPORT_INTERVAL: Duration = Duration::from_secs(3600);

impl Config {
    /// Validate configuration for correctness
    ///
    /// Most validations are enforced by the type system (NonZero types, validated strings).
    /// This checks remaining semantic constraints:
    /// - Report interval is non-zero (configs built in code bypass serde)
    /// - Report interval is in the recommended range
    pub fn validate(&self) -> Result<()> {
        let interval = self.stats.report_interval;

        if interval.is_zero() {
            return Err(anyhow::anyhow!("stats.report_interval must be at least 1 second"));
        }

        if interval > MAX_RECOMMENDED_REPORT_INTERVAL {
            tracing::warn!(
                "stats.report_interval is {:?} (> {:?}). Interval counters will cover long windows.",
                interval,
                MAX_RECOMMENDED_REPORT_INTERVAL
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_zero_interval_invalid() {
        let mut config = Config::default();
        config.stats.report_interval = Duration::ZERO;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("report_interval"));
    }

    #[test]
    fn test_long_interval_only_warns() {
        let mut config = Config::default();
        config.stats.report_interval = Duration::from_secs(86_400);
        assert!(config.validate().is_ok());
    }
}
