//! Sync command implementation.

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Args;

use roster_core::ListState;

use crate::config::{self, PagingArgs, UserApiArgs};
use crate::output;

#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Behave as if the network were unavailable
    #[arg(long)]
    pub offline: bool,

    #[command(flatten)]
    pub api: UserApiArgs,

    #[command(flatten)]
    pub paging: PagingArgs,
}

pub async fn run(args: SyncArgs, cache_dir: &Path) -> Result<()> {
    let controller = config::controller(cache_dir, args.api.source()?, &args.paging)?;

    controller
        .initialize(!args.offline)
        .await
        .context("Failed to initialize user list")?;

    let state = controller.state();
    if state == ListState::NoNetworkNoData {
        bail!("No network and no cached users. Run 'roster users sync' while online.");
    }

    output::success("Synced");
    output::field("Cached", &config::cached_count(cache_dir).await?.to_string());
    output::field("Showing", &output::state_summary(&state));

    Ok(())
}
