//! Small persisted key-value store.

use crate::Result;

/// String values persisted under string keys.
///
/// Used for state that must survive a restart but is too small to warrant
/// its own cache, such as the last weather snapshot.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn put(&self, key: &str, value: &str) -> Result<()>;
}
