//! Command-line argument parsing for the calculator binaries

use crate::config::Config;
use crate::constants::discovery::REPLY_TIMEOUT;
use crate::types::{HostName, Port, ThreadCount};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Concurrent calculator server: TCP arithmetic plus UDP discovery on one port
#[derive(Parser, Debug, Clone)]
#[command(name = "ccs-server", version)]
pub struct ServerArgs {
    /// Port for both the TCP listener and the UDP discovery responder
    pub port: Port,

    /// Host to bind to (overrides config file)
    #[arg(long, env = "CCS_HOST")]
    pub host: Option<HostName>,

    /// Configuration file path (skipped if it does not exist)
    #[arg(short, long, default_value = "ccs.toml", env = "CCS_CONFIG")]
    pub config: String,

    /// Number of worker threads (default: one per CPU, 0 also means one per CPU)
    #[arg(short, long, env = "CCS_THREADS")]
    pub threads: Option<ThreadCount>,

    /// Also write logs to this file (without ANSI colors)
    #[arg(long, env = "CCS_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl ServerArgs {
    /// Get effective host (args override config)
    #[must_use]
    pub fn effective_host(&self, config: &Config) -> HostName {
        self.host
            .clone()
            .unwrap_or_else(|| config.server.host.clone())
    }

    /// Get effective worker count (args override config, default CPU count)
    #[must_use]
    pub fn effective_threads(&self, config: &Config) -> ThreadCount {
        self.threads
            .or(config.server.threads)
            .unwrap_or_else(ThreadCount::available)
    }
}

/// Demo client: discovers a server by broadcast and sends random requests
#[derive(Parser, Debug, Clone)]
#[command(name = "ccs-client", version)]
pub struct ClientArgs {
    /// Server port to probe and connect to
    pub port: Port,

    /// Connect to this address directly instead of broadcasting a probe
    #[arg(long, env = "CCS_SERVER")]
    pub server: Option<SocketAddr>,

    /// Seconds to wait for a discovery reply
    #[arg(long, default_value_t = REPLY_TIMEOUT.as_secs(), env = "CCS_DISCOVERY_TIMEOUT")]
    pub discovery_timeout: u64,

    /// Stop after this many requests (default: run until disconnected)
    #[arg(short = 'n', long)]
    pub count: Option<u64>,
}

impl ClientArgs {
    /// Discovery timeout as Duration
    #[must_use]
    pub const fn discovery_timeout(&self) -> Duration {
        Duration::from_secs(self.discovery_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_args_port_only() {
        let args = ServerArgs::try_parse_from(["ccs-server", "5000"]).unwrap();
        assert_eq!(args.port.get(), 5000);
        assert_eq!(args.config, "ccs.toml");
        assert!(args.host.is_none());
        assert!(args.threads.is_none());
        assert!(args.log_file.is_none());
    }

    #[test]
    fn test_server_args_missing_port() {
        assert!(ServerArgs::try_parse_from(["ccs-server"]).is_err());
    }

    #[test]
    fn test_server_args_invalid_port() {
        assert!(ServerArgs::try_parse_from(["ccs-server", "0"]).is_err());
        assert!(ServerArgs::try_parse_from(["ccs-server", "70000"]).is_err());
        assert!(ServerArgs::try_parse_from(["ccs-server", "abc"]).is_err());
    }

    #[test]
    fn test_server_args_all_flags() {
        let args = ServerArgs::try_parse_from([
            "ccs-server",
            "6000",
            "--host",
            "127.0.0.1",
            "--config",
            "/etc/ccs.toml",
            "--threads",
            "4",
            "--log-file",
            "ccs.log",
        ])
        .unwrap();

        assert_eq!(args.host.as_ref().map(HostName::as_str), Some("127.0.0.1"));
        assert_eq!(args.config, "/etc/ccs.toml");
        assert_eq!(args.threads, ThreadCount::new(4));
        assert_eq!(args.log_file, Some(PathBuf::from("ccs.log")));
    }

    #[test]
    fn test_args_override_config() {
        let mut config = Config::default();
        config.server.host = HostName::new("10.0.0.1".to_string()).unwrap();
        config.server.threads = ThreadCount::new(2);

        let args =
            ServerArgs::try_parse_from(["ccs-server", "5000", "--host", "127.0.0.1"]).unwrap();
        assert_eq!(args.effective_host(&config).as_str(), "127.0.0.1");
        assert_eq!(args.effective_threads(&config).get(), 2);

        let args = ServerArgs::try_parse_from(["ccs-server", "5000", "-t", "8"]).unwrap();
        assert_eq!(args.effective_host(&config).as_str(), "10.0.0.1");
        assert_eq!(args.effective_threads(&config).get(), 8);
    }

    #[test]
    fn test_threads_default_to_cpu_count() {
        let args = ServerArgs::try_parse_from(["ccs-server", "5000"]).unwrap();
        assert_eq!(
            args.effective_threads(&Config::default()),
            ThreadCount::available()
        );
    }

    #[test]
    fn test_client_args() {
        let args = ClientArgs::try_parse_from(["ccs-client", "5000"]).unwrap();
        assert_eq!(args.port.get(), 5000);
        assert_eq!(args.discovery_timeout(), REPLY_TIMEOUT);
        assert!(args.server.is_none());
        assert!(args.count.is_none());

        let args = ClientArgs::try_parse_from([
            "ccs-client",
            "5000",
            "--server",
            "127.0.0.1:5000",
            "-n",
            "3",
        ])
        .unwrap();
        assert_eq!(args.server, Some("127.0.0.1:5000".parse().unwrap()));
        assert_eq!(args.count, Some(3));
    }
}
