//! Periodic statistics reporter

use super::StatsAggregator;
use super::report::StatsReport;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::info;

/// Drains the interval counters on a fixed period and logs a report
#[derive(Debug, Clone)]
pub struct StatsReporter {
    stats: StatsAggregator,
    period: Duration,
}

impl StatsReporter {
    /// Create a reporter firing every `period`, first one period from now
    ///
    /// # Panics
    /// Panics if `period` is zero (tokio intervals reject it); configuration
    /// parsing already refuses a zero report interval.
    #[must_use]
    pub fn new(stats: StatsAggregator, period: Duration) -> Self {
        assert!(!period.is_zero(), "report period must be non-zero");
        Self { stats, period }
    }

    /// Reporting period
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Produce one report now, resetting the interval counters
    pub fn report_once(&self) -> StatsReport {
        let report = self.stats.report();
        info!(
            lifetime_requests = report.lifetime.requests,
            lifetime_errors = report.lifetime.errors,
            interval_requests = report.interval.requests,
            interval_errors = report.interval.errors,
            active_connections = report.active_connections,
            "Statistics report\n{}",
            report
        );
        report
    }

    /// Report forever
    ///
    /// A single task drives every tick, so two reports never overlap; ticks
    /// missed while a report was being emitted are skipped.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            self.report_once();
        }
    }

    /// Spawn [`run`](Self::run) as a background task
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_once_resets_interval_only() {
        let stats = StatsAggregator::new();
        stats.record_request();
        stats.record_error();

        let reporter = StatsReporter::new(stats.clone(), Duration::from_secs(10));
        let report = reporter.report_once();

        assert_eq!(report.interval.requests, 1);
        assert_eq!(report.interval.errors, 1);
        assert!(stats.interval().is_empty());
        assert_eq!(stats.lifetime().requests, 1);
    }

    #[test]
    #[should_panic(expected = "non-zero")]
    fn test_zero_period_rejected() {
        let _ = StatsReporter::new(StatsAggregator::new(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_report_after_one_period() {
        let stats = StatsAggregator::new();
        stats.record_request();
        let handle = StatsReporter::new(stats.clone(), Duration::from_secs(10)).spawn();

        tokio::time::sleep(Duration::from_secs(9)).await;
        assert_eq!(stats.interval().requests, 1);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(stats.interval().is_empty());

        stats.record_request();
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(stats.interval().is_empty());
        assert_eq!(stats.lifetime().requests, 2);

        handle.abort();
    }
}
