//! Browse command implementation.
//!
//! Reads one line at a time from stdin. Plain lines are search queries fed
//! through the debouncer (an empty line clears the search); `:more` loads the
//! next page and `:quit` stops. Every list state change is printed as it is
//! published.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};

use roster_core::{DEFAULT_SEARCH_DELAY, ListState, LoadOutcome, SearchDebouncer};

use crate::config::{self, PagingArgs, UserApiArgs};
use crate::output;

#[derive(Args, Debug)]
pub struct BrowseArgs {
    /// Behave as if the network were unavailable
    #[arg(long)]
    pub offline: bool,

    /// Quiet period before a typed query runs, in milliseconds
    #[arg(long, default_value_t = DEFAULT_SEARCH_DELAY.as_millis() as u64)]
    pub debounce_ms: u64,

    #[command(flatten)]
    pub api: UserApiArgs,

    #[command(flatten)]
    pub paging: PagingArgs,
}

fn render(state: &ListState) {
    println!("{}", format!("-- {}", output::state_summary(state)).bold());
    for user in state.users() {
        println!("{}", output::user_row(user));
    }
}

pub async fn run(args: BrowseArgs, cache_dir: &Path) -> Result<()> {
    let controller = Arc::new(config::controller(
        cache_dir,
        args.api.source()?,
        &args.paging,
    )?);

    let mut updates = controller.subscribe();
    let printer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let state = updates.borrow_and_update().clone();
            if state != ListState::Loading {
                render(&state);
            }
        }
    });

    controller
        .initialize(!args.offline)
        .await
        .context("Failed to initialize user list")?;

    let debouncer = SearchDebouncer::for_controller(
        Arc::clone(&controller),
        Duration::from_millis(args.debounce_ms),
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        match line.trim() {
            ":quit" => break,
            ":more" => match controller.load_more().await {
                Ok(LoadOutcome::Exhausted) => eprintln!("{}", "End of list.".dimmed()),
                Ok(LoadOutcome::Filtered) => {
                    eprintln!("{}", "Clear the search to page.".dimmed())
                }
                Ok(_) => {}
                Err(err) => output::error(&format!("Failed to load next page: {}", err)),
            },
            query => debouncer.push(query),
        }
    }

    debouncer.finish().await;
    // The printer ends once the last sender handle is gone.
    drop(controller);
    printer.await.context("State printer failed")?;

    Ok(())
}
