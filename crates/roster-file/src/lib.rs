//! roster-file - Filesystem-backed stores for roster.

mod cache;
mod kv;
mod lock;

pub use cache::{CacheEntry, FileUserCache};
pub use kv::FileKeyValueStore;
