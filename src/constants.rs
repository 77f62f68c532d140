//! Constants used throughout the calculator service
//!
//! This module centralizes magic numbers and configuration values
//! to improve maintainability and reduce duplication.

use std::time::Duration;

/// Buffer size constants
pub mod buffer {
    /// Initial capacity of the per-session request line buffer
    /// Requests are three short tokens: "MUL -2147483648 2147483647"
    pub const LINE: usize = 64;

    /// BufReader capacity for client request parsing (8KB)
    pub const READER_CAPACITY: usize = 8 * 1024;

    /// Receive buffer for discovery datagrams
    pub const DATAGRAM: usize = 1024;
}

/// Statistics reporting defaults
pub mod stats {
    use super::Duration;

    /// Period between statistics reports; the first report fires one period after start
    pub const REPORT_INTERVAL: Duration = Duration::from_secs(10);
}

/// Discovery client defaults
pub mod discovery {
    use super::Duration;
    use std::net::Ipv4Addr;

    /// How long a client waits for a `CCS FOUND` reply
    pub const REPLY_TIMEOUT: Duration = Duration::from_secs(3);

    /// Limited broadcast address used for discovery probes
    pub const BROADCAST_ADDR: Ipv4Addr = Ipv4Addr::BROADCAST;
}

/// Demo client request generation
pub mod client {
    use std::ops::Range;

    /// Operands are drawn from this range (matches `[-10, 9]`)
    pub const OPERAND_RANGE: Range<i32> = -10..10;

    /// Pause between requests, in whole seconds
    pub const PAUSE_SECS: Range<u64> = 1..4;
}
