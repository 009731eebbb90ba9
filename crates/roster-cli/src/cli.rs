//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::users::UsersCommand;
use crate::commands::weather::WeatherCommand;

/// Browse a cached directory of user profiles.
#[derive(Parser, Debug)]
#[command(name = "roster")]
#[command(author, version = env!("ROSTER_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Directory holding the user cache and header store
    #[arg(long, env = "ROSTER_CACHE_DIR", global = true)]
    pub cache_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cached user directory operations
    Users(UsersCommand),

    /// Header weather operations
    Weather(WeatherCommand),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "roster",
            "users",
            "list",
            "--pages",
            "3",
            "-vv",
            "--cache-dir",
            "/tmp/roster",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.cache_dir, Some(PathBuf::from("/tmp/roster")));
    }
}
