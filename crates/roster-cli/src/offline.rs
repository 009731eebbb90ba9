//! Stand-in remote for commands that must not touch the network.

use async_trait::async_trait;

use roster_core::error::TransportError;
use roster_core::{Coordinates, CurrentConditions, Result, UserRecord, UserSource, WeatherSource};

/// A remote that is never reachable.
#[derive(Debug, Clone, Copy, Default)]
pub struct Offline;

fn unreachable() -> roster_core::Error {
    TransportError::Connection {
        message: "offline mode".to_string(),
    }
    .into()
}

#[async_trait]
impl UserSource for Offline {
    async fn fetch_batch(&self) -> Result<Vec<UserRecord>> {
        Err(unreachable())
    }
}

#[async_trait]
impl WeatherSource for Offline {
    async fn current(&self, _at: Coordinates) -> Result<CurrentConditions> {
        Err(unreachable())
    }

    async fn city_name(&self, _at: Coordinates) -> Result<String> {
        Err(unreachable())
    }
}
