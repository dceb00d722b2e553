//! TripTales Server CLI
//!
//! Starts the HTTP server for itinerary submission and moderation.

use clap::Parser;
use std::path::PathBuf;
use std::process;
use triptales_server::{config::ServerConfig, start_server, telemetry, ServerError};

/// TripTales - itinerary submission and moderation server
#[derive(Parser, Debug)]
#[command(name = "triptales-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Load configuration from a TOML file
    #[arg(long, env = "TRIPTALES_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    if let Err(e) = run(Args::parse()).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), ServerError> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::from_file(path)?,
        None => {
            tracing::warn!("No config file specified, using default configuration");
            tracing::warn!("Usage: triptales-server --config <path-to-config.toml>");
            ServerConfig::default()
        }
    };
    config.apply_env()?;

    start_server(config).await
}
