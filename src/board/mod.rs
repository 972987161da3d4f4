//! Board service: the pagination and search engine over the message store.
//!
//! The HTTP layer calls into this module for every operation; it never
//! touches the repository directly. All three operations are synchronous
//! from the caller's perspective: they either fully complete or fail with
//! a typed error.

pub mod pagination;
pub mod search;

use crate::db::{Database, Message};
use crate::error::{BoardResult, Error};
use search::ContentFilter;
use serde::Serialize;

/// Messages shown per page.
pub const PAGE_SIZE: u32 = 50;

/// Hard ceiling on the number of pages the board will serve.
pub const MAX_PAGES: u32 = 20;

/// Retention cap. Derived from the pagination ceiling so the two cannot
/// drift: once the board is full, every message is reachable through the
/// pager.
pub const MAX_MESSAGES: u32 = PAGE_SIZE * MAX_PAGES;

/// One page of the board plus pagination metadata.
#[derive(Debug, Clone, Serialize)]
pub struct PageResult {
    /// Messages in canonical order (`created_at DESC, id DESC`).
    pub messages: Vec<Message>,
    /// Clamped 1-based page index.
    pub current_page: u32,
    /// Total pages, floored at 1 even for an empty result.
    pub total_pages: u32,
    /// Total rows matching the filter.
    pub total_count: i64,
    /// Normalized search term, echoed back into the UI and links.
    pub search: String,
}

/// Board operations consumed by the HTTP layer.
pub struct BoardService {
    db: Database,
}

impl BoardService {
    /// Create a board service over an open database.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Submit a message. The content is trimmed; empty input fails with
    /// [`Error::EmptyContent`]. Insert and retention commit atomically,
    /// so the cap holds the moment this returns. Returns the new id.
    pub async fn submit(&self, raw_content: &str) -> BoardResult<i64> {
        let content = raw_content.trim();
        if content.is_empty() {
            return Err(Error::EmptyContent);
        }

        let id = self
            .db
            .messages()
            .insert_with_cap(content, MAX_MESSAGES)
            .await?;
        tracing::debug!(id, "message stored");
        Ok(id)
    }

    /// Delete a message by raw id. An unparseable id or a missing row is a
    /// no-op; returns whether a row was removed.
    pub async fn delete(&self, raw_id: &str) -> BoardResult<bool> {
        let Ok(id) = raw_id.trim().parse::<i64>() else {
            return Ok(false);
        };

        let removed = self.db.messages().delete_by_id(id).await?;
        if removed {
            tracing::debug!(id, "message deleted");
        }
        Ok(removed)
    }

    /// List one page with the default board geometry.
    pub async fn list(
        &self,
        raw_search: Option<&str>,
        raw_page: Option<&str>,
    ) -> BoardResult<PageResult> {
        self.list_with(raw_search, raw_page, PAGE_SIZE, MAX_PAGES).await
    }

    /// List one page with explicit geometry.
    ///
    /// The requested page is clamped into `1..=total_pages`; a search term
    /// matching nothing yields an empty page 1 of 1.
    pub async fn list_with(
        &self,
        raw_search: Option<&str>,
        raw_page: Option<&str>,
        page_size: u32,
        max_pages: u32,
    ) -> BoardResult<PageResult> {
        let filter = ContentFilter::new(raw_search.unwrap_or(""));
        let repo = self.db.messages();

        let total_count = repo.count(filter.pattern()).await?;
        let total_pages = pagination::total_pages(total_count, page_size, max_pages);
        let current_page = pagination::clamp_page(pagination::parse_page(raw_page), total_pages);
        let offset = (current_page - 1) * page_size;

        let messages = repo.page(filter.pattern(), page_size, offset).await?;

        Ok(PageResult {
            messages,
            current_page,
            total_pages,
            total_count,
            search: filter.term().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn board() -> (Database, BoardService) {
        let db = Database::new(":memory:").await.unwrap();
        let service = BoardService::new(db.clone());
        (db, service)
    }

    #[tokio::test]
    async fn submit_trims_and_stores() {
        let (db, service) = board().await;
        let id = service.submit("  hello board  ").await.unwrap();
        assert!(id > 0);

        let messages = db.messages().page(None, 10, 0).await.unwrap();
        assert_eq!(messages[0].content, "hello board");
    }

    #[tokio::test]
    async fn submit_rejects_empty_content() {
        let (db, service) = board().await;
        let err = service.submit("   \n\t  ").await.unwrap_err();
        assert!(matches!(err, Error::EmptyContent));
        assert_eq!(db.messages().count(None).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn delete_ignores_unparseable_ids() {
        let (_db, service) = board().await;
        assert!(!service.delete("not-a-number").await.unwrap());
        assert!(!service.delete("").await.unwrap());
        // nonexistent id twice: a successful no-op both times
        assert!(!service.delete("12345").await.unwrap());
        assert!(!service.delete("12345").await.unwrap());
    }

    #[tokio::test]
    async fn empty_board_reports_page_one_of_one() {
        let (_db, service) = board().await;
        let page = service.list(None, Some("999")).await.unwrap();
        assert_eq!(page.total_count, 0);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.current_page, 1);
        assert!(page.messages.is_empty());
    }

    #[tokio::test]
    async fn paging_splits_in_canonical_order() {
        let (_db, service) = board().await;
        service.submit("message A").await.unwrap();
        service.submit("message B").await.unwrap();
        service.submit("message C").await.unwrap();

        let first = service.list_with(None, Some("1"), 2, 20).await.unwrap();
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.total_count, 3);
        let contents: Vec<&str> = first.messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["message C", "message B"]);

        let second = service.list_with(None, Some("2"), 2, 20).await.unwrap();
        assert_eq!(second.messages.len(), 1);
        assert_eq!(second.messages[0].content, "message A");
    }

    #[tokio::test]
    async fn page_requests_are_clamped() {
        let (_db, service) = board().await;
        for i in 0..5 {
            service.submit(&format!("m{i}")).await.unwrap();
        }

        let page = service.list_with(None, Some("999"), 2, 20).await.unwrap();
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, 3);
        assert_eq!(page.messages.len(), 1);

        let junk = service.list_with(None, Some("zero"), 2, 20).await.unwrap();
        assert_eq!(junk.current_page, 1);
    }

    #[tokio::test]
    async fn search_matches_literally() {
        let (_db, service) = board().await;
        service.submit("50% done").await.unwrap();
        service.submit("completely different").await.unwrap();

        let hits = service.list(Some("50%"), None).await.unwrap();
        assert_eq!(hits.total_count, 1);
        assert_eq!(hits.messages[0].content, "50% done");
        assert_eq!(hits.search, "50%");

        let misses = service.list(Some("50X"), None).await.unwrap();
        assert_eq!(misses.total_count, 0);
        assert_eq!(misses.total_pages, 1);
        assert!(misses.messages.is_empty());
    }

    #[tokio::test]
    async fn read_own_write() {
        let (_db, service) = board().await;
        let id = service.submit("just posted").await.unwrap();
        let page = service.list(None, None).await.unwrap();
        assert_eq!(page.messages[0].id, id);
    }
}
