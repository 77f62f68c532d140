//! Atomic statistics aggregator with interval reset
//!
//! Recording takes the shared side of a reset gate and never blocks another
//! recorder; only a reset or report takes the gate exclusively.

use super::report::StatsReport;
use super::snapshot::{CounterSnapshot, IntervalSnapshot, LifetimeSnapshot, OperationCounts};
use crate::protocol::{Evaluation, Operation};
use std::sync::atomic::{AtomicI64, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

// ============================================================================
// Internal Storage Types
// ============================================================================

/// One set of counters with atomic storage
#[derive(Debug, Default)]
struct Counters {
    connections: AtomicU64,
    requests: AtomicU64,
    operations: [AtomicU64; 4],
    errors: AtomicU64,
    sum: AtomicI64,
}

impl Counters {
    #[inline]
    fn operation(&self, operation: Operation) -> &AtomicU64 {
        let slot = match operation {
            Operation::Add => 0,
            Operation::Sub => 1,
            Operation::Mul => 2,
            Operation::Div => 3,
        };
        &self.operations[slot]
    }

    fn load(&self) -> CounterSnapshot {
        let [add, sub, mul, div] = &self.operations;
        CounterSnapshot {
            connections: self.connections.load(Ordering::Relaxed),
            requests: self.requests.load(Ordering::Relaxed),
            operations: OperationCounts {
                add: add.load(Ordering::Relaxed),
                sub: sub.load(Ordering::Relaxed),
                mul: mul.load(Ordering::Relaxed),
                div: div.load(Ordering::Relaxed),
            },
            errors: self.errors.load(Ordering::Relaxed),
            sum: self.sum.load(Ordering::Relaxed),
        }
    }

    /// Read and zero every counter
    fn take(&self) -> CounterSnapshot {
        let [add, sub, mul, div] = &self.operations;
        CounterSnapshot {
            connections: self.connections.swap(0, Ordering::Relaxed),
            requests: self.requests.swap(0, Ordering::Relaxed),
            operations: OperationCounts {
                add: add.swap(0, Ordering::Relaxed),
                sub: sub.swap(0, Ordering::Relaxed),
                mul: mul.swap(0, Ordering::Relaxed),
                div: div.swap(0, Ordering::Relaxed),
            },
            errors: self.errors.swap(0, Ordering::Relaxed),
            sum: self.sum.swap(0, Ordering::Relaxed),
        }
    }
}

#[derive(Debug)]
struct StatsInner {
    lifetime: Counters,
    interval: Counters,
    active_connections: AtomicUsize,
    /// Shared by recorders, exclusive for snapshot-and-reset.
    ///
    /// Recorders hold it only for the two `fetch_add`s of one event, so a
    /// reset waits for in-flight events to land in both copies and no event
    /// can straddle a reset.
    reset_gate: RwLock<()>,
    start_time: Instant,
}

// ============================================================================
// Public API
// ============================================================================

/// Thread-safe statistics aggregator
///
/// Cloning is cheap and every clone updates the same counters. All methods
/// are safe to call concurrently from any thread or task.
///
/// # Examples
/// ```
/// use ccs::metrics::StatsAggregator;
/// use ccs::protocol::Operation;
///
/// let stats = StatsAggregator::new();
/// stats.record_request();
/// stats.record_operation(Operation::Add);
/// stats.record_result(8);
///
/// let interval = stats.snapshot_and_reset_interval();
/// assert_eq!(interval.requests, 1);
/// assert_eq!(interval.sum, 8);
///
/// // Lifetime counters survive the reset
/// assert_eq!(stats.lifetime().requests, 1);
/// assert!(stats.snapshot_and_reset_interval().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct StatsAggregator {
    inner: Arc<StatsInner>,
}

impl StatsAggregator {
    /// Create an aggregator with every counter at zero
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(StatsInner {
                lifetime: Counters::default(),
                interval: Counters::default(),
                active_connections: AtomicUsize::new(0),
                reset_gate: RwLock::new(()),
                start_time: Instant::now(),
            }),
        }
    }

    // The gate guards no data, so a poisoned lock carries no broken state.
    #[inline]
    fn recording(&self) -> RwLockReadGuard<'_, ()> {
        self.inner
            .reset_gate
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    #[inline]
    fn resetting(&self) -> RwLockWriteGuard<'_, ()> {
        self.inner
            .reset_gate
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply one event to the lifetime and interval copy of a counter
    #[inline]
    fn record_pair<F>(&self, field: F, delta: u64)
    where
        F: Fn(&Counters) -> &AtomicU64,
    {
        let _gate = self.recording();
        field(&self.inner.lifetime).fetch_add(delta, Ordering::Relaxed);
        field(&self.inner.interval).fetch_add(delta, Ordering::Relaxed);
    }

    // Event recording

    /// Record a newly accepted client connection
    #[inline]
    pub fn record_connection(&self) {
        self.record_pair(|c| &c.connections, 1);
    }

    /// Record a request line read from a client
    #[inline]
    pub fn record_request(&self) {
        self.record_pair(|c| &c.requests, 1);
    }

    /// Record an attempted operation
    #[inline]
    pub fn record_operation(&self, operation: Operation) {
        self.record_pair(|c| c.operation(operation), 1);
    }

    /// Record a failed request
    #[inline]
    pub fn record_error(&self) {
        self.record_pair(|c| &c.errors, 1);
    }

    /// Add a successful result to the running sum
    #[inline]
    pub fn record_result(&self, value: i64) {
        let _gate = self.recording();
        self.inner.lifetime.sum.fetch_add(value, Ordering::Relaxed);
        self.inner.interval.sum.fetch_add(value, Ordering::Relaxed);
    }

    /// Record everything an evaluation implies, operation counter first
    ///
    /// A DIV with a zero divisor counts as a DIV and as an error. All of an
    /// evaluation's updates land on the same side of any reset.
    pub fn record_evaluation(&self, evaluation: &Evaluation) {
        let _gate = self.recording();
        for counters in [&self.inner.lifetime, &self.inner.interval] {
            if let Some(operation) = evaluation.operation {
                counters.operation(operation).fetch_add(1, Ordering::Relaxed);
            }
            match evaluation.outcome {
                Ok(value) => {
                    counters.sum.fetch_add(value, Ordering::Relaxed);
                }
                Err(_) => {
                    counters.errors.fetch_add(1, Ordering::Relaxed);
                }
            }
        }
    }

    // Connection gauge

    /// Mark a session as open; the returned guard closes it on drop
    #[must_use = "the connection is counted as closed when the guard drops"]
    pub fn connection_opened(&self) -> ActiveConnectionGuard {
        self.inner
            .active_connections
            .fetch_add(1, Ordering::Relaxed);
        ActiveConnectionGuard {
            stats: self.clone(),
        }
    }

    /// Number of sessions currently open
    #[must_use]
    #[inline]
    pub fn active_connections(&self) -> usize {
        self.inner.active_connections.load(Ordering::Relaxed)
    }

    // Reading

    /// Read the lifetime counters
    #[must_use]
    pub fn lifetime(&self) -> LifetimeSnapshot {
        self.inner.lifetime.load()
    }

    /// Read the interval counters without resetting them
    #[must_use]
    pub fn interval(&self) -> IntervalSnapshot {
        self.inner.interval.load()
    }

    /// Return the interval counters and zero them
    ///
    /// At most one reset runs at a time. Every event recorded concurrently
    /// lands either in the returned snapshot or in the next interval.
    pub fn snapshot_and_reset_interval(&self) -> IntervalSnapshot {
        let _gate = self.resetting();
        self.inner.interval.take()
    }

    /// Drain the interval and read the lifetime counters under one exclusion
    ///
    /// Both halves of the report describe the same set of recorded events.
    pub fn report(&self) -> StatsReport {
        let (interval, lifetime) = {
            let _gate = self.resetting();
            (self.inner.interval.take(), self.inner.lifetime.load())
        };

        StatsReport {
            lifetime,
            interval,
            active_connections: self.active_connections(),
            uptime: self.inner.start_time.elapsed(),
        }
    }
}

impl Default for StatsAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps a session counted in the active gauge until dropped
#[derive(Debug)]
pub struct ActiveConnectionGuard {
    stats: StatsAggregator,
}

impl Drop for ActiveConnectionGuard {
    fn drop(&mut self) {
        self.stats
            .inner
            .active_connections
            .fetch_sub(1, Ordering::Relaxed);
    }
}
