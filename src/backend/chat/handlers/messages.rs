/**
 * Message Handlers
 *
 * Finding a chat, posting into it, reading it, and marking it read.
 *
 * A chat is only visible to its buyer and seller. Anyone else, and any
 * request for a chat id that does not exist, gets the same 403 so existing
 * chat ids cannot be enumerated.
 */

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};

use crate::backend::auth::sessions::RequestIdentity;
use crate::backend::chat::db::{ChatRecord, MessageTarget};
use crate::backend::chat::handlers::types::{
    ChatIdResponse, ChatMessagesResponse, FindChatQuery, MarkReadResponse, SendMessageRequest,
    SendMessageResponse,
};
use crate::backend::error::ApiError;
use crate::backend::extract::{ApiJson, ApiPath, ApiQuery};
use crate::backend::server::state::AppState;
use crate::shared::error::require_non_blank;
use crate::shared::MessageView;

const ACCESS_DENIED: &str = "Access denied.";

/// Load a chat the caller participates in
async fn participant_chat(
    state: &AppState,
    chat_id: i64,
    identity: &RequestIdentity,
) -> Result<ChatRecord, ApiError> {
    match state.chats.chat_by_id(chat_id).await? {
        Some(chat) if chat.has_participant(identity.id) => Ok(chat),
        _ => {
            tracing::warn!(
                user_id = identity.id,
                chat_id,
                "Access denied: not a participant"
            );
            Err(ApiError::forbidden(ACCESS_DENIED))
        }
    }
}

/// GET /api/chats/find?vehicleId=..&sellerId=..
///
/// The caller's chat, as buyer, with `sellerId` about `vehicleId`.
pub async fn find_chat(
    State(state): State<AppState>,
    identity: RequestIdentity,
    ApiQuery(query): ApiQuery<FindChatQuery>,
) -> Result<Json<ChatIdResponse>, ApiError> {
    let (Some(vehicle_id), Some(seller_id)) = (query.vehicle_id, query.seller_id) else {
        return Err(ApiError::validation("vehicleId and sellerId are required"));
    };

    let chat = state
        .chats
        .find_chat(vehicle_id, identity.id, seller_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Chat not found"))?;

    Ok(Json(ChatIdResponse { chat_id: chat.id }))
}

/// POST /api/chats/message
///
/// # Errors
///
/// * `400 Bad Request` - Empty message, no target, or a seller messaging
///   their own listing
/// * `403 Forbidden` - `chatId` names a chat the caller is not part of
/// * `404 Not Found` - `vehicleId` names no vehicle
pub async fn send_message(
    State(state): State<AppState>,
    identity: RequestIdentity,
    ApiJson(request): ApiJson<SendMessageRequest>,
) -> Result<(StatusCode, Json<SendMessageResponse>), ApiError> {
    require_non_blank("message", &request.message)?;

    let target = match (request.chat_id, request.vehicle_id) {
        (Some(chat_id), _) => {
            participant_chat(&state, chat_id, &identity).await?;
            MessageTarget::Chat(chat_id)
        }
        (None, Some(vehicle_id)) => MessageTarget::Vehicle(vehicle_id),
        (None, None) => return Err(ApiError::validation("chatId or vehicleId is required")),
    };

    if let Some(receiver_id) = request.receiver_id {
        tracing::debug!(receiver_id, "Ignoring client-supplied receiverId");
    }

    let posted = state
        .chats
        .post_message(identity.id, target, &request.message)
        .await
        .map_err(|e| {
            tracing::warn!(user_id = identity.id, message_target = ?target, "Failed to send message: {}", e);
            ApiError::from(e)
        })?;

    tracing::info!(
        user_id = identity.id,
        chat_id = posted.chat_id,
        message_id = posted.message.id,
        "Message sent"
    );

    Ok((
        StatusCode::CREATED,
        Json(SendMessageResponse {
            chat_id: posted.chat_id,
            message: posted.message,
        }),
    ))
}

/// GET /api/chats/{chatId}/messages
///
/// Oldest first. Does not change read state.
pub async fn chat_messages(
    State(state): State<AppState>,
    identity: RequestIdentity,
    ApiPath(chat_id): ApiPath<i64>,
) -> Result<Json<ChatMessagesResponse>, ApiError> {
    let chat = participant_chat(&state, chat_id, &identity).await?;

    let messages = state
        .chats
        .messages_in(chat.id)
        .await?
        .into_iter()
        .map(|record| MessageView::for_viewer(record, identity.id))
        .collect();

    Ok(Json(ChatMessagesResponse {
        messages,
        vehicle_id: chat.vehicle_id,
    }))
}

/// PUT /api/chats/{chatId}/read
pub async fn mark_read(
    State(state): State<AppState>,
    identity: RequestIdentity,
    ApiPath(chat_id): ApiPath<i64>,
) -> Result<Json<MarkReadResponse>, ApiError> {
    let chat = participant_chat(&state, chat_id, &identity).await?;
    let marked = state.chats.mark_read(chat.id, identity.id).await?;

    tracing::debug!(user_id = identity.id, chat_id, marked, "Marked messages read");

    Ok(Json(MarkReadResponse { marked }))
}
