//! Local user cache trait.

use async_trait::async_trait;

use crate::Result;
use crate::types::{UserId, UserRecord};

/// Local persistence for user records, keyed by [`UserId`].
///
/// Every listing is ordered by id ascending, so offset/limit ranges are
/// stable across calls as long as no new ids are inserted before the offset.
#[async_trait]
pub trait UserCache: Send + Sync {
    /// Insert the record, or replace the stored record with the same id.
    async fn upsert(&self, user: &UserRecord) -> Result<()>;

    /// Number of stored records.
    async fn count(&self) -> Result<usize>;

    /// Up to `limit` records starting at `offset`, ordered by id.
    async fn range(&self, offset: usize, limit: usize) -> Result<Vec<UserRecord>>;

    /// All records whose `"first last"` contains `query`, ignoring case,
    /// ordered by id.
    async fn search(&self, query: &str) -> Result<Vec<UserRecord>>;

    /// A single record by id.
    async fn get(&self, id: &UserId) -> Result<Option<UserRecord>>;

    /// Upsert every record in order.
    async fn upsert_all(&self, users: &[UserRecord]) -> Result<()> {
        for user in users {
            self.upsert(user).await?;
        }
        Ok(())
    }
}
