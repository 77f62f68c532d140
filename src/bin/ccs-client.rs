use anyhow::{Context, Result};
use clap::Parser;
use rand::Rng;
use std::time::Duration;
use tracing::{info, warn};

use ccs::constants::client::PAUSE_SECS;
use ccs::{CalculatorClient, ClientArgs, discover_server, init_logging, random_request};

#[tokio::main]
async fn main() -> Result<()> {
    let args = ClientArgs::parse();

    init_logging(None);

    let addr = match args.server {
        Some(addr) => addr,
        None => {
            info!("Broadcasting discovery probe on port {}", args.port);
            let responder = discover_server(args.port.get(), args.discovery_timeout())
                .await?
                .with_context(|| {
                    format!(
                        "No server answered discovery on port {} within {:?}",
                        args.port,
                        args.discovery_timeout()
                    )
                })?;
            info!("Discovered server at {}", responder.ip());
            // The responder replies from the same port number the TCP listener uses
            std::net::SocketAddr::new(responder.ip(), args.port.get())
        }
    };

    let mut client = CalculatorClient::connect(addr).await?;
    info!("Connected to {}", client.peer());

    tokio::select! {
        result = send_requests(&mut client, args.count) => result,
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, closing connection");
            Ok(())
        }
    }
}

async fn send_requests(client: &mut CalculatorClient, count: Option<u64>) -> Result<()> {
    let mut sent = 0u64;

    while count.is_none_or(|limit| sent < limit) {
        let (request, pause) = {
            let mut rng = rand::thread_rng();
            (random_request(&mut rng), rng.gen_range(PAUSE_SECS))
        };

        match client.request(&request).await {
            Ok(response) => info!("{} = {}", request, response),
            Err(e) => {
                warn!("Connection ended: {:#}", e);
                return Ok(());
            }
        }
        sent += 1;

        if count.is_none_or(|limit| sent < limit) {
            tokio::time::sleep(Duration::from_secs(pause)).await;
        }
    }

    Ok(())
}
