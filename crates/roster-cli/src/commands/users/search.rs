//! Search command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use roster_core::ListState;

use crate::config::{self, PagingArgs};
use crate::offline::Offline;
use crate::output;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Case-insensitive substring of the full name
    pub query: String,

    /// Print one JSON object per user
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: SearchArgs, cache_dir: &Path) -> Result<()> {
    let paging = PagingArgs {
        page_size: roster_core::DEFAULT_PAGE_SIZE,
    };
    let controller = config::controller(cache_dir, Offline, &paging)?;

    controller
        .search(&args.query)
        .await
        .context("Failed to search user cache")?;

    match controller.state() {
        ListState::Ready(users) => output::users(&users, args.json)?,
        _ => eprintln!("{}", "No users match.".dimmed()),
    }

    Ok(())
}
