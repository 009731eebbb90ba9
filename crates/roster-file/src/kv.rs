//! Filesystem key-value store.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use roster_core::Result;
use roster_core::traits::KeyValueStore;

use crate::lock::{LockMode, corrupt, map_io, with_lock, write_atomic};

/// Filesystem-backed [`KeyValueStore`].
///
/// All pairs live in a single JSON object at `<root>/header.json`, guarded
/// by `<root>/header.lock`.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    root: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn data_path(&self) -> PathBuf {
        self.root.join("header.json")
    }

    fn lock_path(&self) -> PathBuf {
        self.root.join("header.lock")
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        let path = self.data_path();
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&path).map_err(|e| map_io(&path, e))?;
        serde_json::from_str(&content).map_err(|e| corrupt(&path, e))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        with_lock(&self.lock_path(), LockMode::Shared, || {
            Ok(self.read_all()?.remove(key))
        })
    }

    #[instrument(skip(self, value))]
    fn put(&self, key: &str, value: &str) -> Result<()> {
        let path = self.data_path();
        with_lock(&self.lock_path(), LockMode::Exclusive, || {
            let mut all = self.read_all()?;
            all.insert(key.to_string(), value.to_string());
            let content = serde_json::to_string_pretty(&all).map_err(|e| corrupt(&path, e))?;
            write_atomic(&path, &content)
        })?;
        debug!("Stored value");
        Ok(())
    }
}
