//! Weather decoration for the header bar.

use tokio::sync::watch;
use tracing::{debug, instrument, warn};

use crate::traits::{KeyValueStore, WeatherSource};
use crate::types::{Coordinates, CurrentConditions, HeaderState, WeatherSnapshot};

/// Key under which the flattened snapshot is persisted.
pub const WEATHER_SNAPSHOT_KEY: &str = "weather_snapshot";

/// What a [`WeatherDecorator::refresh`] ended up publishing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeatherRefresh {
    /// Both remote calls succeeded.
    Fresh(WeatherSnapshot),
    /// A remote call failed; the last persisted snapshot was shown instead.
    Stale(WeatherSnapshot),
    /// A remote call failed and nothing was persisted.
    Unavailable,
}

/// Publishes a header state annotated with the weather at a location.
///
/// Independent of the user list. The last good snapshot is persisted through
/// the injected [`KeyValueStore`] so a cold start can paint it immediately
/// via [`load_cached`](Self::load_cached).
pub struct WeatherDecorator<W, K> {
    source: W,
    store: K,
    title: String,
    header: watch::Sender<HeaderState>,
}

impl<W, K> WeatherDecorator<W, K>
where
    W: WeatherSource,
    K: KeyValueStore,
{
    /// Create a decorator publishing a title-only header.
    pub fn new(source: W, store: K, title: impl Into<String>) -> Self {
        let title = title.into();
        let (header, _) = watch::channel(HeaderState::title_only(title.clone()));
        Self {
            source,
            store,
            title,
            header,
        }
    }

    /// The header as currently published.
    pub fn header(&self) -> HeaderState {
        self.header.borrow().clone()
    }

    /// Receive every subsequent header change.
    pub fn subscribe(&self) -> watch::Receiver<HeaderState> {
        self.header.subscribe()
    }

    /// Publish the persisted snapshot, if there is one.
    pub fn load_cached(&self) -> Option<WeatherSnapshot> {
        let cached = self.cached();
        self.publish_snapshot(cached.clone());
        cached
    }

    /// Fetch conditions and city for `at`, persist and publish the result.
    ///
    /// Falls back to the persisted snapshot, then to a title-only header,
    /// when either remote call fails. Never returns an error.
    #[instrument(skip(self))]
    pub async fn refresh(&self, at: Coordinates) -> WeatherRefresh {
        let (current, city) = tokio::join!(self.source.current(at), self.source.city_name(at));

        match (current, city) {
            (Ok(current), Ok(city)) => {
                let snapshot = WeatherSnapshot::new(current, city);
                if let Err(err) = self.store.put(WEATHER_SNAPSHOT_KEY, &snapshot.to_flattened()) {
                    warn!(error = %err, "Failed to persist weather snapshot");
                }
                debug!(%snapshot, "Weather refreshed");
                self.publish_snapshot(Some(snapshot.clone()));
                WeatherRefresh::Fresh(snapshot)
            }
            (current, city) => {
                if let Err(err) = &current {
                    warn!(error = %err, "Current weather request failed");
                }
                if let Err(err) = &city {
                    warn!(error = %err, "Reverse geocode request failed");
                }

                let cached = self.cached();
                self.publish_snapshot(cached.clone());
                match cached {
                    Some(snapshot) => WeatherRefresh::Stale(snapshot),
                    None => WeatherRefresh::Unavailable,
                }
            }
        }
    }

    /// Current conditions at an arbitrary location, e.g. a user's address.
    ///
    /// Leaves the header and the persisted snapshot alone.
    #[instrument(skip(self))]
    pub async fn conditions_at(&self, at: Coordinates) -> Option<CurrentConditions> {
        match self.source.current(at).await {
            Ok(conditions) => Some(conditions),
            Err(err) => {
                warn!(error = %err, "Weather request failed");
                None
            }
        }
    }

    fn cached(&self) -> Option<WeatherSnapshot> {
        let flattened = match self.store.get(WEATHER_SNAPSHOT_KEY) {
            Ok(Some(value)) if !value.is_empty() => value,
            Ok(_) => return None,
            Err(err) => {
                warn!(error = %err, "Failed to read persisted weather snapshot");
                return None;
            }
        };

        WeatherSnapshot::from_flattened(&flattened)
            .inspect_err(|err| warn!(error = %err, "Ignoring unreadable weather snapshot"))
            .ok()
    }

    fn publish_snapshot(&self, snapshot: Option<WeatherSnapshot>) {
        let next = match snapshot {
            Some(snapshot) => HeaderState::with_weather(self.title.clone(), snapshot),
            None => HeaderState::title_only(self.title.clone()),
        };
        self.header.send_replace(next);
    }
}
