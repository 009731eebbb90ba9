//! roster - command-line front end for the roster user directory.
//!
//! Browses a locally cached, paginated and searchable list of user profiles
//! seeded from a remote API, with current weather in the header.

mod cli;
mod commands;
mod config;
mod offline;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::{users, weather};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    let cache_dir = config::resolve_cache_dir(cli.cache_dir)?;
    tracing::debug!(cache_dir = %cache_dir.display(), "Using cache directory");

    match cli.command {
        Commands::Users(cmd) => users::handle(cmd, &cache_dir).await,
        Commands::Weather(cmd) => weather::handle(cmd, &cache_dir).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr so stdout stays machine-readable.
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
