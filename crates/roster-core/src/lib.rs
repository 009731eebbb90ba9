//! roster-core - Core types, traits and controllers for the roster user directory.
//!
//! The [`UserListController`] keeps a paginated, searchable user list in step
//! with a local [`UserCache`] and a remote [`UserSource`]. The
//! [`WeatherDecorator`] annotates a [`HeaderState`] with current weather.
//! Concrete caches and sources live in `roster-file` and `roster-http`.

pub mod controller;
pub mod error;
pub mod traits;
pub mod types;
pub mod weather;

#[cfg(test)]
mod testing;

pub use controller::{
    DEFAULT_PAGE_SIZE, DEFAULT_SEARCH_DELAY, ListState, LoadOutcome, PaginationCursor,
    SearchDebouncer, SeedOutcome, UserListController,
};
pub use error::Error;
pub use traits::{KeyValueStore, UserCache, UserSource, WeatherSource};
pub use types::{
    Address, Contact, Coordinates, CurrentConditions, HeaderState, Name, Pictures, ServiceUrl,
    UserId, UserRecord, WeatherIcon, WeatherSnapshot,
};
pub use weather::{WEATHER_SNAPSHOT_KEY, WeatherDecorator, WeatherRefresh};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
