/**
 * Admin Handlers
 *
 * User administration for admins. Both handlers take `Authorized<AdminOnly>`,
 * so buyers and sellers are turned away (403) before any store access.
 *
 * Admin accounts cannot be edited here, including the caller's own.
 */

use axum::{
    extract::State,
    response::Json,
};
use serde::{Deserialize, Serialize};

use crate::backend::auth::users::ProfileUpdate;
use crate::backend::auth::handlers::types::ProfileUpdateRequest;
use crate::backend::error::ApiError;
use crate::backend::extract::{ApiJson, ApiPath};
use crate::backend::middleware::{AdminOnly, Authorized};
use crate::backend::server::state::AppState;
use crate::backend::store::StoreError;
use crate::shared::{PublicUser, Role};

/// Body for PUT /api/admin/users/{id}
#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct AdminUserUpdate {
    #[serde(flatten)]
    pub profile: ProfileUpdateRequest,
    #[serde(default)]
    pub role: String,
}

/// Roles an admin may assign
fn assignable_role(role: &str) -> Result<Role, ApiError> {
    match role.parse::<Role>() {
        Ok(role @ (Role::Buyer | Role::Seller)) => Ok(role),
        _ => Err(ApiError::validation("Invalid role specified.")),
    }
}

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    admin: Authorized<AdminOnly>,
) -> Result<Json<Vec<PublicUser>>, ApiError> {
    let users = state.users.list_users().await?;
    tracing::info!(admin_id = admin.id, count = users.len(), "Admin listed users");
    Ok(Json(users.iter().map(|u| u.to_public()).collect()))
}

/// PUT /api/admin/users/{id}
///
/// # Errors
///
/// * `400 Bad Request` - Role other than buyer/seller, missing fields, or the
///   admin targeting themselves
/// * `404 Not Found` - No such user, or the target is an admin
/// * `409 Conflict` - Username or email belongs to someone else
pub async fn update_user(
    State(state): State<AppState>,
    admin: Authorized<AdminOnly>,
    ApiPath(user_id): ApiPath<i64>,
    ApiJson(request): ApiJson<AdminUserUpdate>,
) -> Result<Json<PublicUser>, ApiError> {
    let role = assignable_role(&request.role)?;

    if admin.id == user_id {
        tracing::warn!(admin_id = admin.id, "Admin attempted to edit own account");
        return Err(ApiError::validation("Admin cannot change their own role via API."));
    }

    request.profile.validate()?;

    let update = ProfileUpdate {
        username: request.profile.username.trim().to_string(),
        email: request.profile.email.trim().to_string(),
        phone: request.profile.phone.trim().to_string(),
    };

    let user = state
        .users
        .admin_update_user(user_id, update, role)
        .await
        .map_err(|e| match e {
            StoreError::Conflict(detail) => {
                tracing::warn!(admin_id = admin.id, user_id, "Admin update conflict: {}", detail);
                ApiError::conflict("Update failed: Email or username might already be in use.")
            }
            other => ApiError::from(other),
        })?
        .ok_or_else(|| ApiError::not_found("User not found or is an admin."))?;

    tracing::info!(admin_id = admin.id, user_id, role = %role, "Admin updated user");

    Ok(Json(user.to_public()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_assignable_roles() {
        assert_eq!(assignable_role("buyer").unwrap(), Role::Buyer);
        assert_eq!(assignable_role("seller").unwrap(), Role::Seller);
        assert_matches!(assignable_role("admin"), Err(ApiError::Validation(_)));
        assert_matches!(assignable_role(""), Err(ApiError::Validation(_)));
    }

    #[test]
    fn test_update_body_is_flat() {
        let body: AdminUserUpdate = serde_json::from_value(serde_json::json!({
            "username": "bob",
            "email": "b@x.com",
            "phone": "0710000000",
            "role": "seller"
        }))
        .unwrap();
        assert_eq!(body.profile.username, "bob");
        assert_eq!(body.role, "seller");
    }
}
