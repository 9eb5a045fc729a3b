/**
 * Profile Handlers
 *
 * GET and PUT /api/profile. Both act on the caller named by the verified
 * token; there is no way to address another user here.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::ProfileUpdateRequest;
use crate::backend::auth::sessions::RequestIdentity;
use crate::backend::auth::users::ProfileUpdate;
use crate::backend::error::ApiError;
use crate::backend::extract::ApiJson;
use crate::backend::server::state::AppState;
use crate::backend::store::StoreError;
use crate::shared::PublicUser;

/// Get current user handler
///
/// # Errors
///
/// * `401`/`403` - From the identity extractor
/// * `404 Not Found` - The account behind the token no longer exists
pub async fn get_profile(
    State(state): State<AppState>,
    identity: RequestIdentity,
) -> Result<Json<PublicUser>, ApiError> {
    let user = state.users.user_by_id(identity.id).await?.ok_or_else(|| {
        tracing::warn!("User not found: {}", identity.id);
        ApiError::not_found("User not found")
    })?;

    Ok(Json(user.to_public()))
}

/// Update own profile
///
/// # Errors
///
/// * `400 Bad Request` - Missing username or email
/// * `404 Not Found` - The account behind the token no longer exists
/// * `409 Conflict` - Username or email belongs to someone else
pub async fn update_profile(
    State(state): State<AppState>,
    identity: RequestIdentity,
    ApiJson(request): ApiJson<ProfileUpdateRequest>,
) -> Result<Json<PublicUser>, ApiError> {
    request.validate()?;

    let update = ProfileUpdate {
        username: request.username.trim().to_string(),
        email: request.email.trim().to_string(),
        phone: request.phone.trim().to_string(),
    };

    let user = state
        .users
        .update_profile(identity.id, update)
        .await
        .map_err(|e| match e {
            StoreError::Conflict(detail) => {
                tracing::warn!("Profile update conflict for user {}: {}", identity.id, detail);
                ApiError::conflict("Email or username already in use.")
            }
            other => ApiError::from(other),
        })?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    tracing::info!("Profile updated for user {}", user.id);

    Ok(Json(user.to_public()))
}
