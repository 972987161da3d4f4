//! Query functions for the message table.

use super::models::{Message, MessageRow};
use crate::db::DbError;
use chrono::{SecondsFormat, Utc};
use sqlx::SqlitePool;

/// Deletes every row outside the newest `capacity` rows in display order.
/// A single statement, so readers never observe a partial eviction.
const RETAIN_NEWEST_SQL: &str = r#"
    DELETE FROM messages
    WHERE id NOT IN (
        SELECT id FROM messages
        ORDER BY created_at DESC, id DESC
        LIMIT ?
    )
"#;

/// RFC 3339 UTC with microsecond precision. Fixed width, so the TEXT
/// column sorts chronologically; same-microsecond ties fall back to id.
fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Insert a message, returning the storage-assigned id.
pub(super) async fn insert(pool: &SqlitePool, content: &str) -> Result<i64, DbError> {
    let result = sqlx::query("INSERT INTO messages (content, created_at) VALUES (?, ?)")
        .bind(content)
        .bind(now_timestamp())
        .execute(pool)
        .await?;

    Ok(result.last_insert_rowid())
}

/// Insert a message and evict overflow beyond `capacity` atomically.
pub(super) async fn insert_with_cap(
    pool: &SqlitePool,
    content: &str,
    capacity: u32,
) -> Result<i64, DbError> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query("INSERT INTO messages (content, created_at) VALUES (?, ?)")
        .bind(content)
        .bind(now_timestamp())
        .execute(&mut *tx)
        .await?;
    let id = result.last_insert_rowid();

    let evicted = sqlx::query(RETAIN_NEWEST_SQL)
        .bind(i64::from(capacity))
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;

    if evicted > 0 {
        tracing::debug!(evicted, capacity, "evicted oldest messages over cap");
    }

    Ok(id)
}

/// Evict rows beyond `capacity`, oldest first. Returns the number evicted.
pub(super) async fn retain_newest(pool: &SqlitePool, capacity: u32) -> Result<u64, DbError> {
    let result = sqlx::query(RETAIN_NEWEST_SQL)
        .bind(i64::from(capacity))
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Delete a message by id. Returns whether a row was removed.
pub(super) async fn delete_by_id(pool: &SqlitePool, id: i64) -> Result<bool, DbError> {
    let result = sqlx::query("DELETE FROM messages WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Count messages, optionally restricted to a LIKE pattern.
pub(super) async fn count(pool: &SqlitePool, pattern: Option<&str>) -> Result<i64, DbError> {
    let n: i64 = match pattern {
        Some(p) => {
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM messages WHERE content LIKE ? ESCAPE '\'"#)
                .bind(p)
                .fetch_one(pool)
                .await?
        }
        None => {
            sqlx::query_scalar("SELECT COUNT(*) FROM messages")
                .fetch_one(pool)
                .await?
        }
    };

    Ok(n)
}

/// Fetch one page in canonical order (`created_at DESC, id DESC`).
pub(super) async fn page(
    pool: &SqlitePool,
    pattern: Option<&str>,
    limit: u32,
    offset: u32,
) -> Result<Vec<Message>, DbError> {
    let rows: Vec<MessageRow> = match pattern {
        Some(p) => {
            sqlx::query_as(
                r#"
                SELECT id, content, created_at
                FROM messages
                WHERE content LIKE ? ESCAPE '\'
                ORDER BY created_at DESC, id DESC
                LIMIT ? OFFSET ?
                "#,
            )
            .bind(p)
            .bind(i64::from(limit))
            .bind(i64::from(offset))
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as(
                r#"
                SELECT id, content, created_at
                FROM messages
                ORDER BY created_at DESC, id DESC
                LIMIT ? OFFSET ?
                "#,
            )
            .bind(i64::from(limit))
            .bind(i64::from(offset))
            .fetch_all(pool)
            .await?
        }
    };

    Ok(rows.into_iter().map(Message::from_row).collect())
}

/// Insert with an explicit timestamp, for ordering and eviction tests.
#[cfg(test)]
pub(super) async fn insert_at(
    pool: &SqlitePool,
    content: &str,
    created_at: &str,
) -> Result<i64, DbError> {
    let result = sqlx::query("INSERT INTO messages (content, created_at) VALUES (?, ?)")
        .bind(content)
        .bind(created_at)
        .execute(pool)
        .await?;

    Ok(result.last_insert_rowid())
}
