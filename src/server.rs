//! Calculator server orchestration
//!
//! This module contains the `CalculatorServer` struct which owns the shared
//! statistics and both sockets, and starts the accept loop, the discovery
//! responder and the statistics reporter as independent tasks.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::info;

use crate::config::Config;
use crate::connection_error::log_connection_error;
use crate::discovery::DiscoveryResponder;
use crate::metrics::{StatsAggregator, StatsReporter};
use crate::runtime::{bind_listener, run_accept_loop};
use crate::types::HostName;

/// Builder for constructing a `CalculatorServer` with optional overrides
///
/// # Examples
///
/// ```no_run
/// # use ccs::{CalculatorServerBuilder, Config};
/// # use std::time::Duration;
/// # async fn run() -> anyhow::Result<()> {
/// let server = CalculatorServerBuilder::new(Config::default(), 5000)
///     .with_report_interval(Duration::from_secs(30))
///     .bind()
///     .await?;
/// println!("listening on {}", server.local_addr()?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CalculatorServerBuilder {
    host: HostName,
    port: u16,
    report_interval: Duration,
    discovery_enabled: bool,
    stats: Option<StatsAggregator>,
}

impl CalculatorServerBuilder {
    /// Create a new builder from configuration and the listening port
    ///
    /// Port `0` lets the OS choose; the discovery socket then follows the
    /// port the TCP listener actually got.
    #[must_use]
    pub fn new(config: Config, port: u16) -> Self {
        Self {
            host: config.server.host,
            port,
            report_interval: config.stats.report_interval,
            discovery_enabled: config.discovery.enabled,
            stats: None,
        }
    }

    /// Override the bind host
    #[must_use]
    pub fn with_host(mut self, host: HostName) -> Self {
        self.host = host;
        self
    }

    /// Override the statistics report period
    #[must_use]
    pub fn with_report_interval(mut self, interval: Duration) -> Self {
        self.report_interval = interval;
        self
    }

    /// Enable or disable the UDP discovery responder
    #[must_use]
    pub fn with_discovery(mut self, enabled: bool) -> Self {
        self.discovery_enabled = enabled;
        self
    }

    /// Share an existing aggregator instead of creating a fresh one
    #[must_use]
    pub fn with_stats(mut self, stats: StatsAggregator) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Bind the TCP listener, then the discovery socket on the same port number
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The report interval is zero
    /// - Either socket cannot be bound
    pub async fn bind(self) -> Result<CalculatorServer> {
        if self.report_interval.is_zero() {
            anyhow::bail!("Report interval must be non-zero");
        }

        let listener = bind_listener(self.host.as_str(), self.port).await?;
        let tcp_addr = listener
            .local_addr()
            .context("Failed to read TCP listener address")?;

        let discovery = if self.discovery_enabled {
            let udp_addr = SocketAddr::new(tcp_addr.ip(), tcp_addr.port());
            Some(DiscoveryResponder::bind(udp_addr).await?)
        } else {
            None
        };

        Ok(CalculatorServer {
            listener,
            discovery,
            stats: self.stats.unwrap_or_default(),
            report_interval: self.report_interval,
        })
    }
}

/// A calculator server with both sockets bound, ready to run
#[derive(Debug)]
pub struct CalculatorServer {
    listener: TcpListener,
    discovery: Option<DiscoveryResponder>,
    stats: StatsAggregator,
    report_interval: Duration,
}

impl CalculatorServer {
    /// Address of the TCP listener
    ///
    /// # Errors
    /// Returns the OS error if the address cannot be read
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Address of the discovery socket, if discovery is enabled
    #[must_use]
    pub fn discovery_addr(&self) -> Option<SocketAddr> {
        self.discovery.as_ref().and_then(|d| d.local_addr().ok())
    }

    /// Shared statistics handle
    #[must_use]
    #[inline]
    pub fn stats(&self) -> &StatsAggregator {
        &self.stats
    }

    /// Serve until the shutdown channel fires or the accept loop fails
    ///
    /// The discovery responder and reporter run as their own tasks; the
    /// discovery responder failing is logged and leaves TCP service running.
    /// Both are stopped when this returns.
    ///
    /// # Errors
    /// Returns an error if accepting connections fails
    pub async fn run(self, shutdown_rx: mpsc::Receiver<()>) -> Result<()> {
        let tcp_addr = self.local_addr()?;
        info!("Calculator server listening on {} (TCP)", tcp_addr);

        let discovery_task = self.discovery.map(|responder| {
            tokio::spawn(async move {
                if let Err(e) = responder.run().await {
                    log_connection_error("Discovery responder stopped", &e);
                }
            })
        });
        if discovery_task.is_none() {
            info!("Discovery responder disabled");
        }

        let reporter_task = StatsReporter::new(self.stats.clone(), self.report_interval).spawn();
        info!(
            "Reporting statistics every {}s",
            self.report_interval.as_secs()
        );

        let result = run_accept_loop(self.stats, self.listener, shutdown_rx).await;

        reporter_task.abort();
        if let Some(task) = discovery_task {
            task.abort();
        }

        match result {
            Ok(()) => {
                info!("Calculator server shutdown complete");
                Ok(())
            }
            Err(e) => {
                log_connection_error("Accept loop terminated", &e);
                Err(e).context("Accept loop failed")
            }
        }
    }
}
