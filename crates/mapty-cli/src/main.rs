//! Mapty CLI - Command-line host
//!
//! Drives the Mapty core with a JSON file store, a terminal map adapter and a
//! fixed-position geolocation provider.

mod cli;
mod commands;
mod config_loader;
mod errors;
mod geolocation;
mod map;
mod output;
mod output_types;

use clap::Parser;
use cli::Cli;

fn main() {
    // Logs go to stderr so --json output stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = commands::execute(cli) {
        errors::from_anyhow(e).display();
        std::process::exit(1);
    }
}
