//! Chat store contract
//!
//! Row-level chat types and the operations chat handlers need from storage.
//! Backends live in `crate::backend::store`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::backend::store::StoreError;
use crate::shared::MessageRecord;

/// A chat row: one conversation per (vehicle, buyer, seller)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRecord {
    pub id: i64,
    pub vehicle_id: i64,
    pub buyer_id: i64,
    pub seller_id: i64,
    pub created_at: DateTime<Utc>,
}

impl ChatRecord {
    pub fn has_participant(&self, user_id: i64) -> bool {
        self.buyer_id == user_id || self.seller_id == user_id
    }
}

/// One chat joined with its vehicle, both participants, its newest message
/// and the viewer's unread count. Input to `summary::summarize`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatActivity {
    pub chat_id: i64,
    pub vehicle_id: i64,
    pub vehicle_title: String,
    pub buyer_id: i64,
    pub buyer_name: String,
    pub seller_id: i64,
    pub seller_name: String,
    pub created_at: DateTime<Utc>,
    pub last_message: Option<String>,
    pub last_message_at: Option<DateTime<Utc>>,
    /// Unread messages in this chat not sent by the viewer
    pub unread_count: i64,
}

/// Where a new message goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageTarget {
    /// An existing chat the sender participates in
    Chat(i64),
    /// The sender's chat (as buyer) about this vehicle, created on first use
    Vehicle(i64),
}

/// Result of `ChatStore::post_message`
#[derive(Debug, Clone, PartialEq)]
pub struct PostedMessage {
    pub chat_id: i64,
    pub message: MessageRecord,
}

#[async_trait]
pub trait ChatStore: Send + Sync {
    /// Every chat the viewer participates in, as buyer or seller
    async fn activity_for(&self, viewer_id: i64) -> Result<Vec<ChatActivity>, StoreError>;

    async fn find_chat(
        &self,
        vehicle_id: i64,
        buyer_id: i64,
        seller_id: i64,
    ) -> Result<Option<ChatRecord>, StoreError>;

    async fn chat_by_id(&self, chat_id: i64) -> Result<Option<ChatRecord>, StoreError>;

    /// Store a message atomically, creating the chat when needed.
    ///
    /// - `Vehicle` target with no such vehicle → `NotFound("Vehicle")`
    /// - `Vehicle` target owned by the sender → `Rejected`
    /// - `Chat` target that does not exist → `NotFound("Chat")`
    ///
    /// Participation in a `Chat` target is the caller's responsibility.
    async fn post_message(
        &self,
        sender_id: i64,
        target: MessageTarget,
        body: &str,
    ) -> Result<PostedMessage, StoreError>;

    /// Messages in a chat, oldest first
    async fn messages_in(&self, chat_id: i64) -> Result<Vec<MessageRecord>, StoreError>;

    /// Mark every unread message in the chat not sent by `viewer_id` as
    /// read, in one step. Returns how many changed.
    async fn mark_read(&self, chat_id: i64, viewer_id: i64) -> Result<u64, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_participant() {
        let chat = ChatRecord {
            id: 1,
            vehicle_id: 10,
            buyer_id: 2,
            seller_id: 3,
            created_at: Utc::now(),
        };
        assert!(chat.has_participant(2));
        assert!(chat.has_participant(3));
        assert!(!chat.has_participant(4));
    }
}
