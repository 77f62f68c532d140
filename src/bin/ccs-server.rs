use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use ccs::{
    CalculatorServerBuilder, RuntimeConfig, ServerArgs, init_logging, load_config_with_fallback,
    spawn_shutdown_handler,
};

fn main() -> Result<()> {
    let args = ServerArgs::parse();

    init_logging(args.log_file.as_deref());

    let (config, source) = load_config_with_fallback(&args.config)?;
    info!("Loaded configuration from {}", source.description());

    let threads = args.effective_threads(&config);
    let rt = RuntimeConfig::from_args(threads).build_runtime()?;

    rt.block_on(run_server(args, config))
}

async fn run_server(args: ServerArgs, config: ccs::Config) -> Result<()> {
    let host = args.effective_host(&config);

    let server = CalculatorServerBuilder::new(config, args.port.get())
        .with_host(host)
        .bind()
        .await
        .with_context(|| format!("Failed to start server on port {}", args.port))?;

    let shutdown_rx = spawn_shutdown_handler();
    server.run(shutdown_rx).await
}
