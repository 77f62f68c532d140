//! Human-readable statistics report

use super::snapshot::{CounterSnapshot, IntervalSnapshot, LifetimeSnapshot};
use crate::formatting::format_uptime;
use std::fmt;
use std::time::Duration;

/// Lifetime totals plus the interval just drained
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsReport {
    pub lifetime: LifetimeSnapshot,
    pub interval: IntervalSnapshot,
    pub active_connections: usize,
    pub uptime: Duration,
}

fn write_counters(f: &mut fmt::Formatter<'_>, counters: &CounterSnapshot) -> fmt::Result {
    writeln!(f, "Newly connected clients: {}", counters.connections)?;
    writeln!(f, "Total requests: {}", counters.requests)?;
    writeln!(f, "ADD operations: {}", counters.operations.add)?;
    writeln!(f, "SUB operations: {}", counters.operations.sub)?;
    writeln!(f, "MUL operations: {}", counters.operations.mul)?;
    writeln!(f, "DIV operations: {}", counters.operations.div)?;
    writeln!(f, "Errors: {}", counters.errors)?;
    writeln!(f, "Sum of results: {}", counters.sum)
}

impl fmt::Display for StatsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "======= STATISTICS REPORT =======")?;
        writeln!(
            f,
            "Uptime: {} | Active connections: {}",
            format_uptime(self.uptime),
            self.active_connections
        )?;
        writeln!(f, " -- Lifetime --")?;
        write_counters(f, &self.lifetime)?;
        writeln!(f, " -- Last interval --")?;
        write_counters(f, &self.interval)?;
        write!(f, "=================================")
    }
}
