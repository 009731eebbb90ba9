//! Runtime configuration: data directory and remote endpoints.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use directories::ProjectDirs;

use roster_core::{DEFAULT_PAGE_SIZE, ServiceUrl, UserCache, UserListController, UserSource};
use roster_file::{FileKeyValueStore, FileUserCache};
use roster_http::{
    DEFAULT_BATCH_SIZE, DEFAULT_USER_API, DEFAULT_WEATHER_API, HttpClient, OpenWeatherSource,
    RandomUserSource,
};

/// Title shown in the header bar of the list screen.
pub const APP_TITLE: &str = "Listing App";

/// Use the explicit directory, or the platform data directory for `roster`.
pub fn resolve_cache_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    let dir = match explicit {
        Some(dir) => dir,
        None => ProjectDirs::from("", "", "roster")
            .context("Could not determine data directory")?
            .data_dir()
            .to_path_buf(),
    };

    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create cache directory {}", dir.display()))?;
    Ok(dir)
}

/// The user cache stored under the data directory.
pub fn user_cache(cache_dir: &Path) -> FileUserCache {
    FileUserCache::new(cache_dir)
}

/// The header key-value store stored under the data directory.
pub fn header_store(cache_dir: &Path) -> FileKeyValueStore {
    FileKeyValueStore::new(cache_dir)
}

/// Paging options shared by the listing commands.
#[derive(Args, Debug, Clone)]
pub struct PagingArgs {
    /// Users per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,
}

/// Where to fetch users from.
#[derive(Args, Debug, Clone)]
pub struct UserApiArgs {
    /// Base URL of the random-user API
    #[arg(long, env = "ROSTER_USER_API", default_value = DEFAULT_USER_API)]
    pub user_api: String,

    /// Users requested per remote batch
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,
}

impl UserApiArgs {
    pub fn source(&self) -> Result<RandomUserSource> {
        let base = ServiceUrl::new(&self.user_api).context("Invalid user API URL")?;
        let client = HttpClient::new().context("Failed to create HTTP client")?;
        Ok(RandomUserSource::new(client, base, self.batch_size))
    }
}

/// Where to fetch weather from.
#[derive(Args, Debug, Clone)]
pub struct WeatherApiArgs {
    /// Base URL of the weather API
    #[arg(long, env = "ROSTER_WEATHER_API", default_value = DEFAULT_WEATHER_API)]
    pub weather_api: String,

    /// Weather API key
    #[arg(long, env = "ROSTER_WEATHER_KEY", hide_env_values = true)]
    pub weather_key: Option<String>,
}

impl WeatherApiArgs {
    pub fn source(&self) -> Result<OpenWeatherSource> {
        let key = self
            .weather_key
            .as_deref()
            .context("No weather API key. Pass --weather-key or set ROSTER_WEATHER_KEY.")?;
        let base = ServiceUrl::new(&self.weather_api).context("Invalid weather API URL")?;
        let client = HttpClient::new().context("Failed to create HTTP client")?;
        Ok(OpenWeatherSource::new(client, base, key))
    }
}

/// A list controller over the cache in `cache_dir`.
pub fn controller<S: UserSource>(
    cache_dir: &Path,
    source: S,
    paging: &PagingArgs,
) -> Result<UserListController<FileUserCache, S>> {
    UserListController::new(user_cache(cache_dir), source, paging.page_size)
        .context("Invalid page size")
}

/// Number of users in the cache.
pub async fn cached_count(cache_dir: &Path) -> Result<usize> {
    user_cache(cache_dir)
        .count()
        .await
        .context("Failed to read user cache")
}
