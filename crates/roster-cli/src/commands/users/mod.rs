//! User directory subcommand implementations.

mod browse;
mod list;
mod refresh;
mod search;
mod show;
mod sync;

use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Args, Debug)]
pub struct UsersCommand {
    #[command(subcommand)]
    pub command: UsersSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum UsersSubcommand {
    /// Start a session: seed an empty cache and load the first page
    Sync(sync::SyncArgs),

    /// List cached users page by page
    List(list::ListArgs),

    /// Filter cached users by name
    Search(search::SearchArgs),

    /// Show one user's details
    Show(show::ShowArgs),

    /// Refetch users from the remote API and reload from the first page
    Refresh(refresh::RefreshArgs),

    /// Interactive browsing: type to search, `:more` for the next page
    Browse(browse::BrowseArgs),
}

pub async fn handle(cmd: UsersCommand, cache_dir: &Path) -> Result<()> {
    match cmd.command {
        UsersSubcommand::Sync(args) => sync::run(args, cache_dir).await,
        UsersSubcommand::List(args) => list::run(args, cache_dir).await,
        UsersSubcommand::Search(args) => search::run(args, cache_dir).await,
        UsersSubcommand::Show(args) => show::run(args, cache_dir).await,
        UsersSubcommand::Refresh(args) => refresh::run(args, cache_dir).await,
        UsersSubcommand::Browse(args) => browse::run(args, cache_dir).await,
    }
}
