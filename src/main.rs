use clap::Parser;
use tracing::error;

use travelrec::TravelRecError;
use travelrec::cli::{self, Cli};
use travelrec::config::TravelRecConfig;
use travelrec::telemetry;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match TravelRecConfig::load_from_path(cli.config.clone()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e:#}");
            std::process::exit(1);
        }
    };
    if let Some(data) = &cli.data {
        config.data.source.clone_from(data);
    }

    let telemetry_guard = match telemetry::init(&config.logging, cli.verbose) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialise logging: {e:#}");
            std::process::exit(1);
        }
    };

    if let Err(e) = cli::run(cli, config).await {
        error!("{:#}", e);
        match e.downcast_ref::<TravelRecError>() {
            Some(travel_err) => eprintln!("Error: {}", travel_err.user_message()),
            None => eprintln!("Error: {e:#}"),
        }
        drop(telemetry_guard);
        std::process::exit(1);
    }
}
