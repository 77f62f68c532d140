//! Usage statistics for the calculator service
//!
//! Every counter exists twice: a lifetime copy that only ever grows and an
//! interval copy that the periodic reporter drains. Updates are atomic and
//! safe to issue from any number of session tasks at once.

mod aggregator;
mod report;
mod reporter;
mod snapshot;

pub use aggregator::{ActiveConnectionGuard, StatsAggregator};
pub use report::StatsReport;
pub use reporter::StatsReporter;
pub use snapshot::{CounterSnapshot, IntervalSnapshot, LifetimeSnapshot, OperationCounts};
