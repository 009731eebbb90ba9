//! Weather show command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use roster_core::{Coordinates, Error, HeaderState, WeatherDecorator, WeatherRefresh};

use crate::config::{self, APP_TITLE, WeatherApiArgs};
use crate::offline::Offline;
use crate::output;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Latitude in decimal degrees; omit with --lon to run without a location
    #[arg(long, allow_hyphen_values = true, requires = "lon")]
    pub lat: Option<f64>,

    /// Longitude in decimal degrees
    #[arg(long, allow_hyphen_values = true, requires = "lat")]
    pub lon: Option<f64>,

    /// Print the resulting header as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub weather_api: WeatherApiArgs,
}

/// The location to look up, or `PermissionDenied` when none was granted.
fn location(args: &ShowArgs) -> roster_core::Result<Coordinates> {
    match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => Coordinates::new(lat, lon),
        _ => Err(Error::PermissionDenied),
    }
}

fn print(header: &HeaderState, as_json: bool) -> Result<()> {
    if as_json {
        return output::json_pretty(header);
    }
    output::header(header);
    Ok(())
}

pub async fn run(args: ShowArgs, cache_dir: &Path) -> Result<()> {
    let at = match location(&args) {
        Ok(at) => at,
        Err(Error::PermissionDenied) => {
            eprintln!("{}", "No location granted; showing last known weather.".dimmed());
            let decorator =
                WeatherDecorator::new(Offline, config::header_store(cache_dir), APP_TITLE);
            if decorator.load_cached().is_none() {
                tracing::debug!("No cached weather");
            }
            return print(&decorator.header(), args.json);
        }
        Err(err) => return Err(err).context("Invalid coordinates"),
    };

    let decorator = WeatherDecorator::new(
        args.weather_api.source()?,
        config::header_store(cache_dir),
        APP_TITLE,
    );

    if let Some(cached) = decorator.load_cached() {
        tracing::debug!(%cached, "Painted cached weather");
    }
    let outcome = decorator.refresh(at).await;

    print(&decorator.header(), args.json)?;
    if args.json {
        return Ok(());
    }
    match outcome {
        WeatherRefresh::Fresh(_) => {}
        WeatherRefresh::Stale(_) => {
            eprintln!("{}", "Weather service unreachable; showing last known weather.".dimmed())
        }
        WeatherRefresh::Unavailable => output::error("Weather unavailable"),
    }

    Ok(())
}
