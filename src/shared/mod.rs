//! Shared Module
//!
//! Types that travel over the HTTP API. They carry no database or framework
//! dependencies so clients and tests can use them directly for
//! (de)serialization.

/// Roles and user records
pub mod user;

/// Chat summaries and message views
pub mod chat;

/// Shared error types
pub mod error;

/// Re-export commonly used types for convenience
pub use user::{PublicUser, Role};
pub use chat::{ChatSummary, MessageRecord, MessageSide, MessageView, UnreadCount};
pub use error::SharedError;
