//! Chat Data Structures
//!
//! Wire types for the buyer/seller chat: per-conversation summaries, stored
//! message records and the viewer-relative message view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One conversation as seen by the requesting user
///
/// Derived on every fetch; never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSummary {
    pub chat_id: i64,
    pub vehicle_id: i64,
    pub vehicle_title: String,
    /// The counterpart: the seller when the viewer is the buyer, and vice versa
    pub other_user_id: i64,
    pub other_user_name: String,
    /// Body of the newest message, `None` for a chat with no messages yet
    pub last_message: Option<String>,
    /// Time of the newest message, or the chat's creation time when empty
    pub last_message_at: DateTime<Utc>,
    /// Messages from the counterpart the viewer has not read
    pub unread_count: i64,
}

/// A stored message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub id: i64,
    pub chat_id: i64,
    pub sender_id: i64,
    pub message: String,
    pub sent_at: DateTime<Utc>,
    pub is_read: bool,
}

/// Which side of the conversation wrote a message, relative to the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageSide {
    User,
    Other,
}

/// A message rendered for a particular viewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageView {
    pub id: i64,
    pub text: String,
    pub sender: MessageSide,
    pub sent_at: DateTime<Utc>,
}

impl MessageView {
    pub fn for_viewer(record: MessageRecord, viewer_id: i64) -> Self {
        let sender = if record.sender_id == viewer_id {
            MessageSide::User
        } else {
            MessageSide::Other
        };
        Self {
            id: record.id,
            text: record.message,
            sender,
            sent_at: record.sent_at,
        }
    }
}

/// Total unread messages across all of a user's conversations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnreadCount {
    #[serde(rename = "unreadCount")]
    pub unread_count: i64,
}
