//! mdboard - a server-rendered Markdown message board.
//!
//! Users post Markdown-formatted messages; the server persists them in
//! SQLite, renders a paginated, searchable list, and supports deletion.
//! The board never holds more than [`board::MAX_MESSAGES`] messages: the
//! oldest rows are evicted inside the same transaction as the insert that
//! pushed the board over the cap.

pub mod board;
pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod render;

pub use board::{BoardService, PageResult};
pub use config::Config;
pub use db::Database;
pub use error::Error;
