//! HTTP server for the board UI.
//!
//! Thin glue: parses form/query input, delegates to [`BoardService`], and
//! renders the result with [`PageRenderer`]. Storage failures become a
//! generic 500; empty submissions are silent no-op redirects.

use crate::board::BoardService;
use crate::error::Error;
use crate::render::PageRenderer;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    board: Arc<BoardService>,
    renderer: Arc<PageRenderer>,
}

impl AppState {
    /// Bundle the board service and page renderer for the router.
    pub fn new(board: Arc<BoardService>, renderer: Arc<PageRenderer>) -> Self {
        Self { board, renderer }
    }
}

#[derive(Debug, Deserialize)]
struct ListParams {
    q: Option<String>,
    page: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PostForm {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct DeleteForm {
    #[serde(default)]
    id: String,
    #[serde(default)]
    q: String,
    #[serde(default)]
    page: String,
}

/// Build the board router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/messages", post(post_message))
        .route("/messages/delete", post(delete_message))
        .with_state(state)
}

/// Run the HTTP server until the process exits.
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<(), std::io::Error> {
    let app = router(state);

    tracing::info!(%addr, "Board HTTP server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await
}

/// Handler for GET / - the paginated, searchable message list.
async fn index(State(state): State<AppState>, Query(params): Query<ListParams>) -> Response {
    let page = match state
        .board
        .list(params.q.as_deref(), params.page.as_deref())
        .await
    {
        Ok(page) => page,
        Err(e) => return storage_failure(&e),
    };

    match state.renderer.index(&page) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Template rendering failed");
            internal_error()
        }
    }
}

/// Handler for POST /messages - submit a message, then redirect to the list.
async fn post_message(State(state): State<AppState>, Form(form): Form<PostForm>) -> Response {
    match state.board.submit(&form.content).await {
        // Empty input is a silent no-op, same redirect as success
        Ok(_) | Err(Error::EmptyContent) => Redirect::to("/").into_response(),
        Err(e) => storage_failure(&e),
    }
}

/// Handler for POST /messages/delete - idempotent delete, then redirect
/// back to the page the user was viewing.
async fn delete_message(State(state): State<AppState>, Form(form): Form<DeleteForm>) -> Response {
    match state.board.delete(&form.id).await {
        Ok(_) => Redirect::to(&list_url(&form.q, &form.page)).into_response(),
        Err(e) => storage_failure(&e),
    }
}

/// Build a list URL preserving search and page context.
fn list_url(q: &str, page: &str) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    if !q.is_empty() {
        query.append_pair("q", q);
    }
    if !page.is_empty() {
        query.append_pair("page", page);
    }

    let query = query.finish();
    if query.is_empty() {
        "/".to_string()
    } else {
        format!("/?{query}")
    }
}

fn storage_failure(e: &Error) -> Response {
    tracing::error!(error = %e, code = e.error_code(), "Board operation failed");
    internal_error()
}

fn internal_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
}
