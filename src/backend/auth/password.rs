/**
 * Password Hashing
 *
 * bcrypt hashing with a configurable cost. Every hash embeds its own random
 * salt, so hashing the same password twice yields different strings.
 *
 * Hashing is CPU-bound and deliberately slow. Handlers go through
 * `hash_bounded` / `verify_bounded`, which run on the blocking pool under a
 * time limit instead of stalling the async runtime.
 */

use std::sync::Arc;
use std::time::Duration;

use crate::backend::error::ApiError;

/// Password used to build the dummy hash that unknown-email logins are
/// checked against.
const DUMMY_PASSWORD: &str = "carneeds-unknown-account";

/// bcrypt hasher with a fixed cost
#[derive(Clone, Debug)]
pub struct PasswordHasher {
    cost: u32,
    dummy_hash: Arc<str>,
}

impl PasswordHasher {
    /// Create a hasher. Fails if `cost` is outside bcrypt's accepted range.
    pub fn new(cost: u32) -> Result<Self, bcrypt::BcryptError> {
        let dummy_hash = bcrypt::hash(DUMMY_PASSWORD, cost)?;
        Ok(Self {
            cost,
            dummy_hash: dummy_hash.into(),
        })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password with a fresh random salt
    pub fn hash(&self, plaintext: &str) -> Result<String, bcrypt::BcryptError> {
        bcrypt::hash(plaintext, self.cost)
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// A malformed hash is reported as a mismatch.
    pub fn verify(&self, plaintext: &str, hash: &str) -> bool {
        match bcrypt::verify(plaintext, hash) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::warn!("Stored password hash could not be parsed: {}", e);
                false
            }
        }
    }

    /// Burn the same work as a real verification and always fail.
    ///
    /// Used when the account does not exist so that path costs about as
    /// long as a wrong password.
    pub fn verify_dummy(&self, plaintext: &str) -> bool {
        let _ = bcrypt::verify(plaintext, &self.dummy_hash);
        false
    }

    /// `hash` on the blocking pool, bounded by `limit`
    pub async fn hash_bounded(&self, plaintext: String, limit: Duration) -> Result<String, ApiError> {
        let hasher = self.clone();
        run_bounded(limit, move || hasher.hash(&plaintext))
            .await?
            .map_err(|e| ApiError::internal(format!("Failed to hash password: {}", e)))
    }

    /// `verify` on the blocking pool, bounded by `limit`.
    ///
    /// `stored_hash = None` runs `verify_dummy` instead.
    pub async fn verify_bounded(
        &self,
        plaintext: String,
        stored_hash: Option<String>,
        limit: Duration,
    ) -> Result<bool, ApiError> {
        let hasher = self.clone();
        run_bounded(limit, move || match stored_hash {
            Some(hash) => hasher.verify(&plaintext, &hash),
            None => hasher.verify_dummy(&plaintext),
        })
        .await
    }
}

async fn run_bounded<T, F>(limit: Duration, work: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    match tokio::time::timeout(limit, tokio::task::spawn_blocking(work)).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(join_error)) => Err(ApiError::internal(format!(
            "Password task failed: {}",
            join_error
        ))),
        Err(_) => Err(ApiError::internal(format!(
            "Password task exceeded {:?}",
            limit
        ))),
    }
}
