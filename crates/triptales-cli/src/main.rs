//! TripTales CLI - Operator tooling for the itinerary moderation store.

use clap::Parser;
use triptales_cli::commands;
use triptales_cli::{Cli, Command, Config, Formatter};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> triptales_cli::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(root) = &cli.root {
        config = config.with_root(root);
    }

    let format = cli.format.map(Into::into).unwrap_or(config.cli.format);
    let color_enabled = !cli.no_color && config.cli.color;
    let formatter = Formatter::new(format, color_enabled);

    let output = match cli.command {
        Command::List(args) => commands::execute_list(args, &config, &formatter).await?,
        Command::Show(args) => commands::execute_show(args, &config, &formatter).await?,
        Command::Review(args) => commands::execute_review(args, &config, &formatter).await?,
        Command::Sweep(args) => commands::execute_sweep(args, &config, &formatter).await?,
    };

    if !output.is_empty() {
        println!("{}", output);
    }

    Ok(())
}
