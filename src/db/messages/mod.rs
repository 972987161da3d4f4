//! Message storage and retrieval.
//!
//! # Architecture
//! - Uses sqlx async SQLite (consistent with the rest of the db layer)
//! - RFC 3339 UTC text timestamps; lexicographic order equals chronological
//! - Canonical listing order is `created_at DESC, id DESC` - a stable,
//!   total order (ids break same-timestamp ties)
//! - Retention runs inside the insert transaction, so the cap holds after
//!   every insert completes, not just eventually

mod models;
mod queries;

pub use models::Message;

use crate::db::DbError;
use sqlx::SqlitePool;

/// Repository for board messages.
pub struct MessageRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> MessageRepository<'a> {
    /// Create a new message repository.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a message, assigning the next id and the current timestamp.
    ///
    /// Precondition: `content` is already trimmed and non-empty. The row is
    /// durable when this returns. Returns the new id.
    pub async fn insert(&self, content: &str) -> Result<i64, DbError> {
        queries::insert(self.pool, content).await
    }

    /// Insert a message and enforce the retention cap in one transaction.
    ///
    /// Concurrent inserts cannot under- or over-evict: the insert and the
    /// eviction commit atomically and SQLite serializes writers.
    pub async fn insert_with_cap(&self, content: &str, capacity: u32) -> Result<i64, DbError> {
        queries::insert_with_cap(self.pool, content, capacity).await
    }

    /// Delete every row outside the newest `capacity` rows in display
    /// order (i.e. evict oldest-first). Returns the number evicted.
    pub async fn retain_newest(&self, capacity: u32) -> Result<u64, DbError> {
        queries::retain_newest(self.pool, capacity).await
    }

    /// Delete a message by id. Idempotent: returns whether a row was
    /// removed; a missing id is a successful no-op.
    pub async fn delete_by_id(&self, id: i64) -> Result<bool, DbError> {
        queries::delete_by_id(self.pool, id).await
    }

    /// Count messages, optionally restricted to a LIKE `pattern` (with
    /// `\` escapes, as produced by the search filter).
    pub async fn count(&self, pattern: Option<&str>) -> Result<i64, DbError> {
        queries::count(self.pool, pattern).await
    }

    /// Fetch up to `limit` messages in canonical order, skipping `offset`
    /// leading rows. An offset past the end yields an empty vec.
    pub async fn page(
        &self,
        pattern: Option<&str>,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Message>, DbError> {
        queries::page(self.pool, pattern, limit, offset).await
    }
}
