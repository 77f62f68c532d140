//! Plain-value copies of the statistics counters

use crate::protocol::Operation;

/// Per-operation request counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OperationCounts {
    pub add: u64,
    pub sub: u64,
    pub mul: u64,
    pub div: u64,
}

impl OperationCounts {
    /// Count for a single operation
    #[must_use]
    #[inline]
    pub const fn get(&self, operation: Operation) -> u64 {
        match operation {
            Operation::Add => self.add,
            Operation::Sub => self.sub,
            Operation::Mul => self.mul,
            Operation::Div => self.div,
        }
    }

    /// Sum over all operations
    #[must_use]
    #[inline]
    pub const fn total(&self) -> u64 {
        self.add + self.sub + self.mul + self.div
    }
}

/// One set of counters read at a point in time
///
/// Fields are read one by one; no cross-field atomicity is implied unless the
/// snapshot came from [`StatsAggregator::report`](super::StatsAggregator::report).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterSnapshot {
    pub connections: u64,
    pub requests: u64,
    pub operations: OperationCounts,
    pub errors: u64,
    pub sum: i64,
}

/// Counters accumulated since the last reset
pub type IntervalSnapshot = CounterSnapshot;

/// Counters accumulated since process start
pub type LifetimeSnapshot = CounterSnapshot;

impl CounterSnapshot {
    /// Whether nothing at all was recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Requests that produced a numeric result
    ///
    /// Failed DIV requests count both as a DIV and as an error, so this is
    /// only meaningful as a lower bound when DIV-by-zero occurred.
    #[must_use]
    pub fn successes(&self) -> u64 {
        self.requests.saturating_sub(self.errors)
    }
}
