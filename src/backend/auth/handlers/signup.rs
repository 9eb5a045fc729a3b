/**
 * Signup Handler
 *
 * POST /api/signup
 *
 * # Registration Process
 *
 * 1. Validate required fields and email shape
 * 2. Derive the role from `userType`
 * 3. Hash the password on the blocking pool
 * 4. Insert the user; the store's unique constraint decides conflicts
 * 5. Return the public record with `201 Created`
 *
 * No token is issued here. Clients log in afterwards.
 */

use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::auth::handlers::types::SignupRequest;
use crate::backend::auth::users::NewUser;
use crate::backend::error::ApiError;
use crate::backend::extract::ApiJson;
use crate::backend::server::state::AppState;
use crate::backend::store::StoreError;
use crate::shared::PublicUser;

const DUPLICATE_MESSAGE: &str = "User with this email or username already exists.";

/// Sign up handler
///
/// # Errors
///
/// * `400 Bad Request` - Missing username, email or password, or malformed email
/// * `409 Conflict` - Username or email already registered
/// * `500 Internal Server Error` - Hashing or persistence failed
///
/// # Example Request
///
/// ```http
/// POST /api/signup HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "email": "a@x.com",
///   "phone": "0771234567",
///   "userType": "buyer",
///   "password": "secret1"
/// }
/// ```
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SignupRequest>,
) -> Result<(StatusCode, Json<PublicUser>), ApiError> {
    request.validate().map_err(|e| {
        tracing::warn!("Rejected signup: {}", e);
        ApiError::from(e)
    })?;

    let role = request.role();
    tracing::info!(
        "Signup request for username: {}, email: {}, role: {}",
        request.username,
        request.email,
        role
    );

    let password_hash = state
        .hasher
        .hash_bounded(request.password, state.config.hash_timeout)
        .await?;

    let user = state
        .users
        .create_user(NewUser {
            username: request.username.trim().to_string(),
            email: request.email.trim().to_string(),
            phone: request.phone.trim().to_string(),
            role,
            password_hash,
        })
        .await
        .map_err(|e| match e {
            StoreError::Conflict(detail) => {
                tracing::warn!("Duplicate signup for {}: {}", request.email, detail);
                ApiError::conflict(DUPLICATE_MESSAGE)
            }
            other => ApiError::internal(format!("Failed to create user: {}", other)),
        })?;

    tracing::info!("User created successfully: {} (id {})", user.username, user.id);

    Ok((StatusCode::CREATED, Json(user.to_public())))
}
