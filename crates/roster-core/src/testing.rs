//! In-memory collaborators for unit tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::Result;
use crate::error::{CacheError, ParseError, TransportError};
use crate::traits::{KeyValueStore, UserCache, UserSource, WeatherSource};
use crate::types::fixtures::user;
use crate::types::{Coordinates, CurrentConditions, UserId, UserRecord};

/// `count` users with ids `u000`, `u001`, ... so id order is insertion order.
pub fn users(count: usize) -> Vec<UserRecord> {
    (0..count)
        .map(|i| user(&format!("u{:03}", i), &format!("First{}", i), "Tester"))
        .collect()
}

#[derive(Default)]
pub struct MemoryCache {
    users: Mutex<BTreeMap<UserId, UserRecord>>,
    pub range_calls: AtomicUsize,
    pub fail: AtomicBool,
    count_delay: Option<Duration>,
}

impl MemoryCache {
    pub fn with_users(users: Vec<UserRecord>) -> Self {
        let cache = Self::default();
        {
            let mut map = cache.users.lock().unwrap();
            for u in users {
                map.insert(u.id.clone(), u);
            }
        }
        cache
    }

    /// Suspend in `count` after reading the value, so a concurrent writer can
    /// make the answer stale.
    pub fn with_count_delay(mut self, delay: Duration) -> Self {
        self.count_delay = Some(delay);
        self
    }

    fn check(&self) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(CacheError::Other {
                message: "disk on fire".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl UserCache for MemoryCache {
    async fn upsert(&self, user: &UserRecord) -> Result<()> {
        self.check()?;
        self.users
            .lock()
            .unwrap()
            .insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn count(&self) -> Result<usize> {
        self.check()?;
        let count = self.users.lock().unwrap().len();
        if let Some(delay) = self.count_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(count)
    }

    async fn range(&self, offset: usize, limit: usize) -> Result<Vec<UserRecord>> {
        self.check()?;
        self.range_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn search(&self, query: &str) -> Result<Vec<UserRecord>> {
        self.check()?;
        let needle = query.to_lowercase();
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .filter(|u| u.matches_lowercase(&needle))
            .cloned()
            .collect())
    }

    async fn get(&self, id: &UserId) -> Result<Option<UserRecord>> {
        self.check()?;
        Ok(self.users.lock().unwrap().get(id).cloned())
    }
}

/// A user source returning a fixed batch, counting calls.
#[derive(Default)]
pub struct FakeSource {
    batch: Vec<UserRecord>,
    pub calls: AtomicUsize,
    pub fail: AtomicBool,
    delay: Option<Duration>,
}

impl FakeSource {
    pub fn returning(batch: Vec<UserRecord>) -> Self {
        Self {
            batch,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        let source = Self::default();
        source.fail.store(true, Ordering::SeqCst);
        source
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserSource for FakeSource {
    async fn fetch_batch(&self) -> Result<Vec<UserRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail.load(Ordering::SeqCst) {
            return Err(TransportError::Connection {
                message: "network unreachable".to_string(),
            }
            .into());
        }
        Ok(self.batch.clone())
    }
}

/// A weather source with independently failing endpoints.
pub struct FakeWeather {
    pub conditions: Option<CurrentConditions>,
    pub city: Option<String>,
    pub calls: AtomicUsize,
}

impl FakeWeather {
    pub fn sunny(city: &str) -> Self {
        Self {
            conditions: Some(CurrentConditions {
                temperature_celsius: 24,
                condition: "clear sky".to_string(),
                icon_id: "01d".to_string(),
            }),
            city: Some(city.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn down() -> Self {
        Self {
            conditions: None,
            city: None,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl WeatherSource for FakeWeather {
    async fn current(&self, _at: Coordinates) -> Result<CurrentConditions> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.conditions
            .clone()
            .ok_or_else(|| TransportError::Timeout.into())
    }

    async fn city_name(&self, _at: Coordinates) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.city.clone().ok_or_else(|| {
            ParseError::MissingField {
                what: "reverse geocode response",
                field: "name",
            }
            .into()
        })
    }
}

#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    pub fail_writes: AtomicBool,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CacheError::Other {
                message: "read-only".to_string(),
            }
            .into());
        }
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
