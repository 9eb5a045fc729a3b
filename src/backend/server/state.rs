/**
 * Application State Management
 *
 * `AppState` is the one value every handler is given. It is cheap to clone:
 * every field is an `Arc` or wraps one.
 *
 * # Thread Safety
 *
 * - Token keys and configuration are read-only after startup
 * - Stores are `Arc<dyn …Store>`; their backends synchronize internally
 *   (a `PgPool`, or the in-memory store's mutex)
 *
 * # State Extraction
 *
 * The `FromRef` implementations let extractors (notably `RequestIdentity`)
 * pull the part they need without depending on the whole `AppState`.
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::sessions::TokenKeys;
use crate::backend::auth::users::UserStore;
use crate::backend::chat::db::ChatStore;
use crate::backend::server::config::ServerConfig;

/// Main application state
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub chats: Arc<dyn ChatStore>,
    pub tokens: Arc<TokenKeys>,
    pub hasher: PasswordHasher,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// State over a single backend serving both users and chats
    pub fn with_store<S>(store: Arc<S>, config: &ServerConfig) -> Result<Self, bcrypt::BcryptError>
    where
        S: UserStore + ChatStore + 'static,
    {
        Ok(Self {
            users: store.clone(),
            chats: store,
            tokens: Arc::new(TokenKeys::from_secret(config.jwt_secret.as_bytes())),
            hasher: PasswordHasher::new(config.bcrypt_cost)?,
            config: Arc::new(config.clone()),
        })
    }
}

impl FromRef<AppState> for Arc<TokenKeys> {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}

impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
