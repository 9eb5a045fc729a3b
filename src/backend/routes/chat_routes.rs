/**
 * Chat Routes
 *
 * All chat routes require a bearer token. `/api/seller/inbox` additionally
 * requires the seller or admin role.
 *
 * `/api/chats/find` and `/api/chats/unread-count` are static segments, so
 * axum matches them ahead of the `/api/chats/{chat_id}/…` captures.
 */

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::backend::chat::handlers::{
    chat_messages, find_chat, list_chats, mark_read, seller_inbox, send_message, unread_count,
};
use crate::backend::server::state::AppState;

/// Configure chat routes
pub fn configure_chat_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/chats", get(list_chats))
        .route("/api/chats/unread-count", get(unread_count))
        .route("/api/chats/find", get(find_chat))
        .route("/api/chats/message", post(send_message))
        .route("/api/chats/{chat_id}/messages", get(chat_messages))
        .route("/api/chats/{chat_id}/read", put(mark_read))
        .route("/api/seller/inbox", get(seller_inbox))
}
