/**
 * Chat Handler Types
 *
 * Request and response bodies for the chat endpoints. Field names follow
 * the web client's camelCase (`chatId`, `vehicleId`).
 */

use serde::{Deserialize, Serialize};

use crate::shared::{MessageRecord, MessageView};

/// Query for GET /api/chats/find
#[derive(Deserialize, Serialize, Debug, Default, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct FindChatQuery {
    pub vehicle_id: Option<i64>,
    pub seller_id: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatIdResponse {
    pub chat_id: i64,
}

/// Body for POST /api/chats/message
///
/// Either `chatId` (reply in an existing chat) or `vehicleId` (open or reuse
/// the sender's chat about that vehicle) must be present.
#[derive(Deserialize, Serialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    #[serde(default)]
    pub message: String,
    pub chat_id: Option<i64>,
    pub vehicle_id: Option<i64>,
    /// Sent by the web client; the receiver is always derived from the
    /// chat or the vehicle's owner.
    pub receiver_id: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub chat_id: i64,
    pub message: MessageRecord,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessagesResponse {
    pub messages: Vec<MessageView>,
    pub vehicle_id: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkReadResponse {
    /// Messages that went from unread to read
    pub marked: u64,
}
