/**
 * Session Tokens
 *
 * Stateless JWT sessions. A token carries the user's id, username and role
 * plus `iat`/`exp`, signed with HS256 under one process-wide secret that is
 * injected from configuration. The same `TokenKeys` value both issues and
 * verifies, so the two paths cannot drift apart.
 *
 * Expiry is checked here rather than by `jsonwebtoken`'s built-in
 * validation: there is no leeway, and the clock is a parameter so the
 * boundary can be tested.
 */

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::Role;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub id: i64,
    pub username: String,
    pub role: Role,
    /// Issued at (Unix timestamp, seconds)
    pub iat: i64,
    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,
}

/// The caller of a request
///
/// The fields are public, so holding a `RequestIdentity` proves nothing by
/// itself. Handlers take it as an extractor argument, and the extractor in
/// `middleware::auth` builds it only from claims that passed
/// `TokenKeys::verify`. Login builds one to sign the token it returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestIdentity {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

impl From<Claims> for RequestIdentity {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.id,
            username: claims.username,
            role: claims.role,
        }
    }
}

/// Token failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Bad signature, wrong key, or unparseable payload
    #[error("token is invalid")]
    Invalid,

    /// Signature is fine but `exp` has passed
    #[error("token has expired")]
    Expired,

    #[error("token could not be signed: {0}")]
    Signing(String),
}

/// Signing and verification keys derived from the configured secret
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenKeys {
    pub fn from_secret(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue a token for `identity` valid for `ttl` from now
    pub fn issue(&self, identity: &RequestIdentity, ttl: Duration) -> Result<String, TokenError> {
        self.issue_at(identity, ttl, Utc::now().timestamp())
    }

    /// Issue a token as if the current time were `issued_at`
    pub fn issue_at(
        &self,
        identity: &RequestIdentity,
        ttl: Duration,
        issued_at: i64,
    ) -> Result<String, TokenError> {
        let claims = Claims {
            id: identity.id,
            username: identity.username.clone(),
            role: identity.role,
            iat: issued_at,
            exp: issued_at + ttl.num_seconds(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify and decode a token against the current time
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify and decode a token as if the current time were `now`.
    ///
    /// A token is still valid at exactly `now == exp`.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            tracing::debug!("Token rejected: {}", e);
            TokenError::Invalid
        })?;

        if now > data.claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(data.claims)
    }
}

impl std::fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenKeys").finish_non_exhaustive()
    }
}
