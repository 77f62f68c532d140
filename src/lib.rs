//! # CCS - Concurrent Calculator Service
//!
//! A small network service that evaluates `ADD|SUB|MUL|DIV a b` request lines
//! over TCP, answers `CCS DISCOVER` probes over UDP on the same port number,
//! and keeps lifetime and rolling-interval usage statistics.
//!
//! ## Architecture
//!
//! - [`runtime::run_accept_loop`] spawns one [`session::ClientSession`] task per
//!   connection
//! - [`discovery::DiscoveryResponder`] answers discovery probes
//! - [`metrics::StatsAggregator`] is the shared counter set; a
//!   [`metrics::StatsReporter`] drains its interval counters periodically
//! - [`server::CalculatorServer`] binds both sockets and wires the tasks together

pub mod args;
pub mod client;
pub mod config;
pub mod connection_error;
pub mod constants;
pub mod discovery;
pub mod formatting;
pub mod logging;
pub mod metrics;
pub mod protocol;
pub mod runtime;
pub mod server;
pub mod session;
pub mod types;

pub use args::{ClientArgs, ServerArgs};
pub use client::{CalculatorClient, discover_server, discover_server_at, random_request};
pub use config::{
    Config, ConfigSource, create_default_config, load_config, load_config_with_fallback,
};
pub use connection_error::ConnectionError;
pub use discovery::DiscoveryResponder;
pub use logging::init_logging;
pub use metrics::{StatsAggregator, StatsReport, StatsReporter};
pub use protocol::{EvalError, Evaluation, Operation, evaluate};
pub use runtime::{RuntimeConfig, shutdown_signal, spawn_shutdown_handler};
pub use server::{CalculatorServer, CalculatorServerBuilder};
pub use session::{ClientSession, SessionSummary};
pub use types::{ClientId, HostName, Port, ThreadCount};
