//! Show command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use clap::Args;
use colored::Colorize;

use roster_core::{HeaderState, UserId, WeatherDecorator};

use crate::config::{self, APP_TITLE, PagingArgs, WeatherApiArgs};
use crate::offline::Offline;
use crate::output;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// User id
    pub id: String,

    /// Also show current weather at the user's location
    #[arg(long)]
    pub weather: bool,

    /// Print the record as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub weather_api: WeatherApiArgs,
}

pub async fn run(args: ShowArgs, cache_dir: &Path) -> Result<()> {
    let id = UserId::new(&args.id).context("Invalid user id")?;
    let paging = PagingArgs {
        page_size: roster_core::DEFAULT_PAGE_SIZE,
    };
    let controller = config::controller(cache_dir, Offline, &paging)?;

    let user = controller
        .user(&id)
        .await
        .context("Failed to read user cache")?
        .with_context(|| format!("No cached user with id {}", id))?;

    if args.json {
        output::json_pretty(&user)?;
        return Ok(());
    }

    output::header(&HeaderState::with_back(user.full_name()));
    println!();
    output::field("Id", user.id.as_str());
    output::field("Gender", &user.gender);
    output::field("Born", &format!("{} (age {})", user.date_of_birth, user.age));
    output::field("Email", &user.contact.email);
    output::field("Phone", &user.contact.phone);
    output::field(
        "Location",
        &format!(
            "{}, {}, {} ({})",
            user.address.city, user.address.state, user.address.country, user.address.coordinates
        ),
    );
    output::field("Picture", &user.pictures.large);

    if let Some(entry) = config::user_cache(cache_dir)
        .entry(&id)
        .context("Failed to read user cache")?
        && let Ok(cached_at) = DateTime::parse_from_rfc3339(&entry.cached_at)
    {
        output::field(
            "Cached",
            &cached_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string(),
        );
    }

    if args.weather {
        let decorator = WeatherDecorator::new(
            args.weather_api.source()?,
            config::header_store(cache_dir),
            APP_TITLE,
        );
        match decorator.conditions_at(user.address.coordinates).await {
            Some(conditions) => output::field(
                "Weather",
                &format!(
                    "{} {}°C {}",
                    conditions.icon().glyph(),
                    conditions.temperature_celsius,
                    conditions.condition
                ),
            ),
            None => eprintln!("{}", "Weather unavailable.".dimmed()),
        }
    }

    Ok(())
}
