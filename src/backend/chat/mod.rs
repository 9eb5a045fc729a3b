//! Chat Backend Module
//!
//! Buyer/seller conversations about a vehicle listing.
//!
//! # Architecture
//!
//! - **`db`** - Chat rows and the `ChatStore` contract
//! - **`summary`** - Viewer-relative summaries and unread totals
//! - **`handlers`** - HTTP handlers
//!
//! Summaries are computed on every request from the store; nothing is
//! cached. Messages become read only through `PUT /api/chats/{id}/read`.

/// Chat store contract
pub mod db;

/// Summary aggregation
pub mod summary;

/// HTTP handlers
pub mod handlers;

/// Re-export commonly used types
pub use db::{ChatActivity, ChatRecord, ChatStore, MessageTarget, PostedMessage};
pub use summary::{summarize, total_unread};
