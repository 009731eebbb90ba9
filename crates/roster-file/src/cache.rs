//! Filesystem user cache.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use roster_core::Result;
use roster_core::traits::UserCache;
use roster_core::types::{UserId, UserRecord};

use crate::lock::{LockMode, corrupt, map_io, with_lock, write_atomic};

/// A cached user with bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// RFC 3339 time of the last upsert.
    pub cached_at: String,
    pub user: UserRecord,
}

/// Filesystem-backed [`UserCache`].
///
/// Layout under the root directory:
///
/// ```text
/// users/<id>.json   one pretty-printed CacheEntry per user
/// users.lock        advisory lock (shared for reads, exclusive for writes)
/// ```
///
/// File names sort the same way ids do, so listing the directory in name
/// order yields id order.
#[derive(Debug, Clone)]
pub struct FileUserCache {
    root: PathBuf,
}

impl FileUserCache {
    /// Create a cache rooted at the given directory. Nothing is written until
    /// the first upsert.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn users_dir(&self) -> PathBuf {
        self.root.join("users")
    }

    fn lock_path(&self) -> PathBuf {
        self.root.join("users.lock")
    }

    fn user_path(&self, id: &UserId) -> PathBuf {
        self.users_dir().join(format!("{}.json", id))
    }

    /// Stored ids in ascending order. Files that are not `<id>.json` are ignored.
    fn sorted_ids(&self) -> Result<Vec<UserId>> {
        let dir = self.users_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in fs::read_dir(&dir).map_err(|e| map_io(&dir, e))? {
            let path = entry.map_err(|e| map_io(&dir, e))?.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match UserId::new(stem) {
                Ok(id) => ids.push(id),
                Err(err) => debug!(path = %path.display(), error = %err, "Skipping stray file"),
            }
        }

        ids.sort();
        Ok(ids)
    }

    fn read_entry(&self, id: &UserId) -> Result<Option<CacheEntry>> {
        let path = self.user_path(id);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path).map_err(|e| map_io(&path, e))?;
        let entry: CacheEntry = serde_json::from_str(&content).map_err(|e| corrupt(&path, e))?;
        if &entry.user.id != id {
            return Err(corrupt(&path, format!("holds user {}", entry.user.id)));
        }
        Ok(Some(entry))
    }

    fn read_users(&self, ids: &[UserId]) -> Result<Vec<UserRecord>> {
        let mut users = Vec::with_capacity(ids.len());
        for id in ids {
            // Listed a moment ago under the same lock, so absence means a
            // concurrent writer outside our locking; skip it.
            if let Some(entry) = self.read_entry(id)? {
                users.push(entry.user);
            }
        }
        Ok(users)
    }

    /// The stored entry for `id`, including when it was cached.
    pub fn entry(&self, id: &UserId) -> Result<Option<CacheEntry>> {
        with_lock(&self.lock_path(), LockMode::Shared, || self.read_entry(id))
    }
}

#[async_trait]
impl UserCache for FileUserCache {
    #[instrument(skip(self, user), fields(id = %user.id))]
    async fn upsert(&self, user: &UserRecord) -> Result<()> {
        let path = self.user_path(&user.id);
        let entry = CacheEntry {
            cached_at: Utc::now().to_rfc3339(),
            user: user.clone(),
        };
        let content = serde_json::to_string_pretty(&entry).map_err(|e| corrupt(&path, e))?;

        with_lock(&self.lock_path(), LockMode::Exclusive, || {
            write_atomic(&path, &content)
        })?;

        debug!("Upserted user");
        Ok(())
    }

    async fn count(&self) -> Result<usize> {
        with_lock(&self.lock_path(), LockMode::Shared, || {
            Ok(self.sorted_ids()?.len())
        })
    }

    #[instrument(skip(self))]
    async fn range(&self, offset: usize, limit: usize) -> Result<Vec<UserRecord>> {
        with_lock(&self.lock_path(), LockMode::Shared, || {
            let ids: Vec<_> = self
                .sorted_ids()?
                .into_iter()
                .skip(offset)
                .take(limit)
                .collect();
            self.read_users(&ids)
        })
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<UserRecord>> {
        let needle = query.to_lowercase();
        let matches = with_lock(&self.lock_path(), LockMode::Shared, || {
            let ids = self.sorted_ids()?;
            Ok(self
                .read_users(&ids)?
                .into_iter()
                .filter(|u| u.matches_lowercase(&needle))
                .collect::<Vec<_>>())
        })?;

        debug!(matches = matches.len(), "Searched cache");
        Ok(matches)
    }

    async fn get(&self, id: &UserId) -> Result<Option<UserRecord>> {
        Ok(self.entry(id)?.map(|entry| entry.user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::Error;
    use roster_core::error::CacheError;
    use roster_core::types::{Address, Contact, Coordinates, Name, Pictures};
    use tempfile::TempDir;

    fn create_test_cache() -> (TempDir, FileUserCache) {
        let tmp = TempDir::new().unwrap();
        let cache = FileUserCache::new(tmp.path());
        (tmp, cache)
    }

    fn user(id: &str, first: &str, last: &str) -> UserRecord {
        UserRecord {
            id: UserId::new(id).unwrap(),
            name: Name {
                first: first.to_string(),
                last: last.to_string(),
            },
            gender: "male".to_string(),
            address: Address {
                city: "Bergen".to_string(),
                state: "Vestland".to_string(),
                country: "Norway".to_string(),
                coordinates: Coordinates::new(60.39, 5.32).unwrap(),
            },
            contact: Contact {
                email: "someone@example.com".to_string(),
                phone: "55 55 55 55".to_string(),
            },
            date_of_birth: "1971-02-03T10:00:00.000Z".to_string(),
            age: 53,
            pictures: Pictures {
                thumbnail: "https://example.com/t.jpg".to_string(),
                medium: "https://example.com/m.jpg".to_string(),
                large: "https://example.com/l.jpg".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_empty_cache() {
        let (_tmp, cache) = create_test_cache();

        assert_eq!(cache.count().await.unwrap(), 0);
        assert!(cache.range(0, 10).await.unwrap().is_empty());
        assert!(cache.search("a").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upsert_and_get() {
        let (_tmp, cache) = create_test_cache();
        let ada = user("ada-1", "Ada", "Lovelace");

        cache.upsert(&ada).await.unwrap();

        assert_eq!(cache.count().await.unwrap(), 1);
        assert_eq!(cache.get(&ada.id).await.unwrap(), Some(ada.clone()));
        let entry = cache.entry(&ada.id).unwrap().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(&entry.cached_at).is_ok());
    }

    #[tokio::test]
    async fn test_upsert_replaces_same_id() {
        let (_tmp, cache) = create_test_cache();

        cache.upsert(&user("x1", "Ada", "Lovelace")).await.unwrap();
        cache.upsert(&user("x1", "Ada", "King")).await.unwrap();

        assert_eq!(cache.count().await.unwrap(), 1);
        let stored = cache.get(&UserId::new("x1").unwrap()).await.unwrap().unwrap();
        assert_eq!(stored.name.last, "King");
    }

    #[tokio::test]
    async fn test_range_is_ordered_by_id() {
        let (_tmp, cache) = create_test_cache();
        for id in ["c", "a", "e", "b", "d"] {
            cache.upsert(&user(id, "N", id)).await.unwrap();
        }

        let page: Vec<_> = cache
            .range(1, 3)
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.id.to_string())
            .collect();
        assert_eq!(page, ["b", "c", "d"]);

        assert_eq!(cache.range(4, 3).await.unwrap().len(), 1);
        assert!(cache.range(5, 3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_over_full_name() {
        let (_tmp, cache) = create_test_cache();
        cache.upsert(&user("1", "Grace", "Hopper")).await.unwrap();
        cache.upsert(&user("2", "Alan", "Turing")).await.unwrap();
        cache.upsert(&user("3", "Ada", "Lovelace")).await.unwrap();

        let hits: Vec<_> = cache
            .search("CE HOP")
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.name.first)
            .collect();
        assert_eq!(hits, ["Grace"]);

        assert_eq!(cache.search("a").await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_ignores_stray_files() {
        let (tmp, cache) = create_test_cache();
        cache.upsert(&user("a", "Ada", "Lovelace")).await.unwrap();

        let users_dir = tmp.path().join("users");
        fs::write(users_dir.join("notes.txt"), "hello").unwrap();
        fs::write(users_dir.join("half.tmp"), "{").unwrap();

        assert_eq!(cache.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_entry_is_cache_error() {
        let (tmp, cache) = create_test_cache();
        cache.upsert(&user("a", "Ada", "Lovelace")).await.unwrap();
        fs::write(tmp.path().join("users").join("a.json"), "not json").unwrap();

        let err = cache.range(0, 10).await.unwrap_err();
        assert!(matches!(err, Error::Cache(CacheError::Corrupt { .. })));
        assert!(!err.is_remote());
    }

    #[tokio::test]
    async fn test_misfiled_entry_is_rejected() {
        let (tmp, cache) = create_test_cache();
        cache.upsert(&user("a", "Ada", "Lovelace")).await.unwrap();
        let users_dir = tmp.path().join("users");
        fs::copy(users_dir.join("a.json"), users_dir.join("b.json")).unwrap();

        let err = cache.get(&UserId::new("b").unwrap()).await.unwrap_err();
        assert!(err.to_string().contains("holds user a"));
    }
}
