//! Default values for configuration fields
//!
//! This module centralizes all default value functions used in serde deserialization.

use crate::constants;
use std::time::Duration;

/// Default period between statistics reports
#[inline]
pub fn report_interval() -> Duration {
    constants::stats::REPORT_INTERVAL
}

/// Discovery responder runs unless disabled
#[inline]
pub fn discovery_enabled() -> bool {
    true
}
