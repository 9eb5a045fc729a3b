/**
 * API Route Handlers
 *
 * Account and service routes.
 *
 * # Routes
 *
 * - `POST /api/signup` - User registration (public)
 * - `POST /api/login` - User login (public)
 * - `GET /api/profile` - Current user (bearer token)
 * - `PUT /api/profile` - Update current user (bearer token)
 * - `GET /api/health` - Liveness check (public)
 */

use axum::{
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};

use crate::backend::auth::{get_profile, login, signup, update_profile};
use crate::backend::server::state::AppState;

/// Liveness check
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Configure account and service routes
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/health", get(health))
        .route("/api/signup", post(signup))
        .route("/api/login", post(login))
        .route("/api/profile", get(get_profile).put(update_profile))
}
