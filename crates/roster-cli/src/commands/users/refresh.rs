//! Refresh command implementation.

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Args;

use roster_core::{ListState, SeedOutcome};

use crate::config::{self, PagingArgs, UserApiArgs};
use crate::output;

#[derive(Args, Debug)]
pub struct RefreshArgs {
    #[command(flatten)]
    pub api: UserApiArgs,

    #[command(flatten)]
    pub paging: PagingArgs,
}

pub async fn run(args: RefreshArgs, cache_dir: &Path) -> Result<()> {
    let controller = config::controller(cache_dir, args.api.source()?, &args.paging)?;

    let outcome = controller
        .resynchronize()
        .await
        .context("Failed to refresh users")?;

    match outcome {
        SeedOutcome::Seeded(count) => output::success(&format!("Fetched {} users", count)),
        _ => output::error("Remote fetch failed; showing cached users"),
    }

    let state = controller.state();
    if state == ListState::NoNetworkNoData {
        bail!("No network and no cached users.");
    }

    output::field("Cached", &config::cached_count(cache_dir).await?.to_string());
    output::field("Showing", &output::state_summary(&state));

    Ok(())
}
