//! List command implementation.

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;

use roster_core::{ListState, LoadOutcome};

use crate::config::{self, PagingArgs, UserApiArgs};
use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Number of pages to load
    #[arg(long, default_value_t = 1)]
    pub pages: usize,

    /// Behave as if the network were unavailable
    #[arg(long)]
    pub offline: bool,

    /// Print one JSON object per user
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub api: UserApiArgs,

    #[command(flatten)]
    pub paging: PagingArgs,
}

pub async fn run(args: ListArgs, cache_dir: &Path) -> Result<()> {
    let controller = config::controller(cache_dir, args.api.source()?, &args.paging)?;

    controller
        .initialize(!args.offline)
        .await
        .context("Failed to initialize user list")?;

    for _ in 1..args.pages {
        let outcome = controller
            .load_more()
            .await
            .context("Failed to load next page")?;
        if outcome == LoadOutcome::Exhausted {
            break;
        }
    }

    match controller.state() {
        ListState::NoNetworkNoData => {
            bail!("No network and no cached users. Run 'roster users sync' while online.")
        }
        ListState::Ready(users) => output::users(&users, args.json)?,
        state => eprintln!("{}", output::state_summary(&state).dimmed()),
    }

    let cursor = controller.cursor();
    eprintln!();
    eprintln!(
        "{}: {}{}",
        "Pages".dimmed(),
        cursor.page_index(),
        if cursor.is_exhausted() { " (end of list)" } else { "" }
    );

    Ok(())
}
