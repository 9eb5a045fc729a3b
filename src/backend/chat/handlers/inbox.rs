/**
 * Inbox Handlers
 *
 * GET /api/chats, GET /api/chats/unread-count and GET /api/seller/inbox.
 * All three are read-only views over `ChatStore::activity_for`.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::sessions::RequestIdentity;
use crate::backend::chat::summary::{summarize, total_unread};
use crate::backend::error::ApiError;
use crate::backend::middleware::{Authorized, SellerOrAdmin};
use crate::backend::server::state::AppState;
use crate::shared::{ChatSummary, UnreadCount};

/// Every chat the caller takes part in, most recent activity first
pub async fn list_chats(
    State(state): State<AppState>,
    identity: RequestIdentity,
) -> Result<Json<Vec<ChatSummary>>, ApiError> {
    let activity = state.chats.activity_for(identity.id).await?;
    let summaries = summarize(identity.id, activity);
    tracing::debug!("Listed {} chats for user {}", summaries.len(), identity.id);
    Ok(Json(summaries))
}

/// Total unread messages across the caller's chats
pub async fn unread_count(
    State(state): State<AppState>,
    identity: RequestIdentity,
) -> Result<Json<UnreadCount>, ApiError> {
    let activity = state.chats.activity_for(identity.id).await?;
    let summaries = summarize(identity.id, activity);
    Ok(Json(UnreadCount {
        unread_count: total_unread(&summaries),
    }))
}

/// Chats about the caller's own listings
pub async fn seller_inbox(
    State(state): State<AppState>,
    seller: Authorized<SellerOrAdmin>,
) -> Result<Json<Vec<ChatSummary>>, ApiError> {
    let activity = state
        .chats
        .activity_for(seller.id)
        .await?
        .into_iter()
        .filter(|chat| chat.seller_id == seller.id)
        .collect();

    Ok(Json(summarize(seller.id, activity)))
}
