//! Weather subcommand implementations.

mod cached;
mod show;

use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Args, Debug)]
pub struct WeatherCommand {
    #[command(subcommand)]
    pub command: WeatherSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum WeatherSubcommand {
    /// Fetch current weather for a location and update the header
    Show(show::ShowArgs),

    /// Show the header as last persisted, without network access
    Cached(cached::CachedArgs),
}

pub async fn handle(cmd: WeatherCommand, cache_dir: &Path) -> Result<()> {
    match cmd.command {
        WeatherSubcommand::Show(args) => show::run(args, cache_dir).await,
        WeatherSubcommand::Cached(args) => cached::run(args, cache_dir),
    }
}
