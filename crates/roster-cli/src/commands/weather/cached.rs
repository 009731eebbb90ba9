//! Weather cached command implementation.

use std::path::Path;

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use roster_core::WeatherDecorator;

use crate::config::{self, APP_TITLE};
use crate::offline::Offline;
use crate::output;

#[derive(Args, Debug)]
pub struct CachedArgs {
    /// Print the header as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: CachedArgs, cache_dir: &Path) -> Result<()> {
    let decorator = WeatherDecorator::new(Offline, config::header_store(cache_dir), APP_TITLE);
    let cached = decorator.load_cached();

    if args.json {
        return output::json_pretty(&decorator.header());
    }

    output::header(&decorator.header());
    if cached.is_none() {
        eprintln!("{}", "No weather cached yet.".dimmed());
    }

    Ok(())
}
