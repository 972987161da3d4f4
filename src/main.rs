//! mdboard - server-rendered Markdown message board.

use anyhow::Context;
use mdboard::board::BoardService;
use mdboard::config::Config;
use mdboard::db::Database;
use mdboard::http::{self, AppState};
use mdboard::render::{PageRenderer, PlainSource};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration
    let config_path = std::env::args().nth(1);
    let config = Config::load_or_default(config_path.as_deref()).map_err(|e| {
        error!(error = %e, "Failed to load config");
        e
    })?;

    info!(
        listen = %config.server.listen,
        port = config.server.port,
        database = %config.database.path,
        "Starting mdboard"
    );

    // Initialize database
    let db = Database::new(&config.database.path).await?;

    let board = Arc::new(BoardService::new(db));
    let renderer = Arc::new(
        PageRenderer::new(Box::new(PlainSource)).context("failed to build template environment")?,
    );

    let addr = config.listen_addr()?;
    http::serve(addr, AppState::new(board, renderer)).await?;

    Ok(())
}
