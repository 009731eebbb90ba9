//! Remote source traits.

use async_trait::async_trait;

use crate::Result;
use crate::types::{Coordinates, CurrentConditions, UserRecord};

/// A remote source of user profiles.
///
/// The source has no paging of its own: every call returns a fresh batch.
#[async_trait]
pub trait UserSource: Send + Sync {
    /// Fetch one batch of users.
    ///
    /// # Errors
    ///
    /// Returns a transport or protocol error if the request fails and a parse
    /// error if any record in the payload is malformed.
    async fn fetch_batch(&self) -> Result<Vec<UserRecord>>;
}

/// A remote weather provider.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Current conditions at a location.
    async fn current(&self, at: Coordinates) -> Result<CurrentConditions>;

    /// Reverse-geocoded city name for a location.
    async fn city_name(&self, at: Coordinates) -> Result<String>;
}
