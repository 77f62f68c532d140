//! Tokio runtime configuration and common utilities for binary targets
//!
//! This module provides:
//! - Testable runtime configuration and builder logic
//! - The TCP accept loop and listener binding
//! - Shutdown signal handling

use crate::connection_error::ConnectionError;
use crate::metrics::StatsAggregator;
use crate::session::ClientSession;
use crate::types::ThreadCount;
use anyhow::Result;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Number of worker threads
    worker_threads: usize,
}

impl RuntimeConfig {
    /// Create runtime config from a thread count
    ///
    /// Single-threaded runtime is used if threads == 1.
    #[must_use]
    pub fn from_args(threads: ThreadCount) -> Self {
        Self {
            worker_threads: threads.get(),
        }
    }

    /// Get number of worker threads
    #[must_use]
    pub const fn worker_threads(&self) -> usize {
        self.worker_threads
    }

    /// Check if single-threaded
    #[must_use]
    pub const fn is_single_threaded(&self) -> bool {
        self.worker_threads == 1
    }

    /// Build the tokio runtime
    ///
    /// Creates either a current-thread or multi-threaded runtime based on
    /// the configured worker thread count.
    ///
    /// # Errors
    /// Returns error if runtime creation fails
    pub fn build_runtime(self) -> Result<tokio::runtime::Runtime> {
        let rt = if self.is_single_threaded() {
            tracing::info!("Starting calculator server with single-threaded runtime");
            tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?
        } else {
            let num_cpus = std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(1);
            tracing::info!(
                "Starting calculator server with {} worker threads (detected {} CPUs)",
                self.worker_threads,
                num_cpus
            );
            tokio::runtime::Builder::new_multi_thread()
                .worker_threads(self.worker_threads)
                .enable_all()
                .build()?
        };

        Ok(rt)
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::from_args(ThreadCount::available())
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM on Unix)
///
/// If a handler cannot be installed, that source is ignored and the other
/// one still resolves the future.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Spawn a task that waits for a shutdown signal and notifies the accept loop
///
/// Returns the shutdown receiver channel.
#[must_use]
pub fn spawn_shutdown_handler() -> mpsc::Receiver<()> {
    let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>(1);

    tokio::spawn(async move {
        shutdown_signal().await;
        info!("Shutdown signal received");

        // Notify listeners
        let _ = shutdown_tx.send(()).await;
    });

    shutdown_rx
}

/// Bind the TCP listener
///
/// # Errors
/// Returns [`ConnectionError::Bind`] if binding fails
pub async fn bind_listener(host: &str, port: u16) -> Result<TcpListener, ConnectionError> {
    TcpListener::bind((host, port))
        .await
        .map_err(|source| ConnectionError::Bind {
            protocol: "TCP",
            address: display_addr(host, port),
            source,
        })
}

fn display_addr(host: &str, port: u16) -> String {
    if host.contains(':') {
        format!("[{}]:{}", host, port)
    } else {
        format!("{}:{}", host, port)
    }
}

/// Run the main accept loop for client connections
///
/// Counts each accepted connection and spawns a session task for it without
/// waiting. Exits when a shutdown message arrives or the sender is dropped;
/// sessions already running are left to finish on their own.
///
/// # Errors
/// Returns [`ConnectionError::Accept`] if `listener.accept()` fails
pub async fn run_accept_loop(
    stats: StatsAggregator,
    listener: TcpListener,
    mut shutdown_rx: mpsc::Receiver<()>,
) -> Result<(), ConnectionError> {
    loop {
        tokio::select! {
            _ = shutdown_rx.recv() => {
                info!("Shutdown initiated, stopping accept loop");
                break;
            }

            accept_result = listener.accept() => {
                let (stream, addr) = accept_result.map_err(ConnectionError::Accept)?;
                stats.record_connection();

                if let Err(e) = stream.set_nodelay(true) {
                    debug!("Failed to set TCP_NODELAY for {}: {}", addr, e);
                }

                let session = ClientSession::new(addr, stats.clone());
                info!("Client {} connected [{}]", addr, session.client_id().short());

                tokio::spawn(async move {
                    session.handle(stream).await;
                });
            }
        }
    }

    Ok(())
}
