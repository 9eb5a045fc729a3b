/**
 * Admin Routes
 *
 * Gated by `Authorized<AdminOnly>` in the handlers themselves.
 */

use axum::{
    routing::{get, put},
    Router,
};

use crate::backend::admin::{list_users, update_user};
use crate::backend::server::state::AppState;

/// Configure admin routes
pub fn configure_admin_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/admin/users", get(list_users))
        .route("/api/admin/users/{user_id}", put(update_user))
}
