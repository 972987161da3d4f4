//! Type definitions for board messages.

use serde::Serialize;

/// Row type from database query: (id, content, created_at)
pub(super) type MessageRow = (i64, String, String);

/// A board message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    /// Storage-assigned id, strictly increasing in insertion order and
    /// never reused after deletion.
    pub id: i64,
    /// Raw Markdown source exactly as submitted.
    pub content: String,
    /// RFC 3339 UTC creation timestamp.
    pub created_at: String,
}

impl Message {
    /// Parse a database row into a Message.
    pub(super) fn from_row(row: MessageRow) -> Self {
        let (id, content, created_at) = row;
        Self {
            id,
            content,
            created_at,
        }
    }
}
