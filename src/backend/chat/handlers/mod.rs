//! Chat Handlers Module
//!
//! # Handlers
//!
//! - **`list_chats`** - GET /api/chats
//! - **`unread_count`** - GET /api/chats/unread-count
//! - **`find_chat`** - GET /api/chats/find
//! - **`send_message`** - POST /api/chats/message
//! - **`chat_messages`** - GET /api/chats/{chatId}/messages
//! - **`mark_read`** - PUT /api/chats/{chatId}/read
//! - **`seller_inbox`** - GET /api/seller/inbox (sellers and admins)

/// Request and response types
pub mod types;

/// Summary views
pub mod inbox;

/// Per-chat operations
pub mod messages;

pub use inbox::{list_chats, seller_inbox, unread_count};
pub use messages::{chat_messages, find_chat, mark_read, send_message};
