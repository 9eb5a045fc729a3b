/**
 * Login Handler
 *
 * POST /api/login
 *
 * # Authentication Process
 *
 * 1. Look up the user by email
 * 2. Verify the password with bcrypt (against a dummy hash when the email is
 *    unknown)
 * 3. Issue a token carrying id, username and role
 * 4. Return `{ token, role }`
 *
 * # Security
 *
 * Unknown email and wrong password produce the same 401 body. Which of the
 * two happened is only visible in the server log.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{LoginRequest, LoginResponse};
use crate::backend::auth::sessions::RequestIdentity;
use crate::backend::error::ApiError;
use crate::backend::extract::ApiJson;
use crate::backend::server::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - Missing email or password
/// * `401 Unauthorized` - Unknown email or wrong password
/// * `500 Internal Server Error` - Store, hashing or signing failure
///
/// # Example Response
///
/// ```json
/// { "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...", "role": "buyer" }
/// ```
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    request.validate()?;
    tracing::info!("Login request for: {}", request.email);

    let user = state.users.user_by_email(request.email.trim()).await?;
    let stored_hash = user.as_ref().map(|u| u.password_hash.clone());

    let valid = state
        .hasher
        .verify_bounded(request.password, stored_hash, state.config.hash_timeout)
        .await?;

    let user = match user {
        Some(user) if valid => user,
        Some(_) => {
            tracing::warn!("Invalid password for: {}", request.email);
            return Err(ApiError::unauthenticated(INVALID_CREDENTIALS));
        }
        None => {
            tracing::warn!("Login for unknown email: {}", request.email);
            return Err(ApiError::unauthenticated(INVALID_CREDENTIALS));
        }
    };

    let identity = RequestIdentity {
        id: user.id,
        username: user.username.clone(),
        role: user.role,
    };
    let token = state.tokens.issue(&identity, state.config.token_ttl)?;

    tracing::info!("User logged in successfully: {} (id {})", user.username, user.id);

    Ok(Json(LoginResponse {
        token,
        role: user.role,
    }))
}
