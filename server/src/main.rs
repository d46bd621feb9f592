use clap::Parser;
use log::{error, info};
use server::config::ServerConfig;
use server::network;
use shared::DEFAULT_TICK_MS;
use std::time::Duration;

/// Command line arguments
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Address to bind to
    #[clap(short = 'H', long, default_value = "0.0.0.0")]
    host: String,
    /// Port to listen on
    #[clap(short, long, env = "PORT", default_value = "3000")]
    port: u16,
    /// Simulation tick period in milliseconds
    #[clap(short, long, default_value_t = DEFAULT_TICK_MS)]
    tick_ms: u64,
    /// Seed for spawn points, colors and damage rolls
    #[clap(long)]
    seed: Option<u64>,
    /// Send the current snapshot to observers as soon as they connect
    #[clap(long)]
    snapshot_on_connect: bool,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        ServerConfig {
            host: args.host,
            port: args.port,
            tick_period: Duration::from_millis(args.tick_ms.max(1)),
            seed: args.seed,
            snapshot_on_connect: args.snapshot_on_connect,
            ..ServerConfig::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from(Args::parse());
    info!(
        "Starting arena on {} with a {}ms tick",
        config.address(),
        config.tick_period.as_millis()
    );

    tokio::select! {
        result = network::run(config) => {
            if let Err(e) = result {
                error!("Server stopped: {}", e);
                return Err(e.into());
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
