/**
 * Authentication Extractor
 *
 * Turns an `Authorization: Bearer <token>` header into a `RequestIdentity`.
 * Handlers that take a `RequestIdentity` argument are protected: axum runs
 * the extractor first and the handler body never executes on failure.
 *
 * - header absent, not `Bearer`, or with an empty token → 401
 * - token present but invalid or expired → 403
 */

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use crate::backend::auth::sessions::{RequestIdentity, TokenKeys};
use crate::backend::error::ApiError;

/// Pull the bearer token out of the request headers
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            ApiError::unauthenticated("Authentication required")
        })?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            tracing::warn!("Invalid Authorization header format");
            ApiError::unauthenticated("Authentication required")
        })?;

    Ok(token)
}

/// Verify the bearer token and return the caller's identity
pub fn authenticate(headers: &HeaderMap, keys: &TokenKeys) -> Result<RequestIdentity, ApiError> {
    let token = bearer_token(headers)?;

    let claims = keys.verify(token).map_err(|e| {
        tracing::warn!("Invalid token: {}", e);
        ApiError::from(e)
    })?;

    Ok(claims.into())
}

impl<S> FromRequestParts<S> for RequestIdentity
where
    Arc<TokenKeys>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = Arc::<TokenKeys>::from_ref(state);
        authenticate(&parts.headers, &keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, StatusCode};
    use chrono::Duration;

    use crate::shared::Role;

    fn keys() -> TokenKeys {
        TokenKeys::from_secret(b"middleware-test-secret-0123456789")
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_missing_header_is_401() {
        let err = authenticate(&HeaderMap::new(), &keys()).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_malformed_header_is_401() {
        for value in ["Bearer", "Bearer ", "Basic abc", "token-without-scheme"] {
            let err = authenticate(&headers_with(value), &keys()).unwrap_err();
            assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED, "{value}");
        }
    }

    #[test]
    fn test_garbage_token_is_403() {
        let err = authenticate(&headers_with("Bearer garbage"), &keys()).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_valid_token_yields_identity() {
        let keys = keys();
        let identity = RequestIdentity {
            id: 4,
            username: "bob".to_string(),
            role: Role::Seller,
        };
        let token = keys.issue(&identity, Duration::hours(1)).unwrap();

        let extracted = authenticate(&headers_with(&format!("Bearer {}", token)), &keys).unwrap();
        assert_eq!(extracted, identity);
    }

    #[tokio::test]
    async fn test_extractor_only_accepts_tokens_from_state_keys() {
        let state = Arc::new(keys());
        let identity = RequestIdentity {
            id: 9,
            username: "mallory".to_string(),
            role: Role::Admin,
        };
        let forged = TokenKeys::from_secret(b"some-other-secret-0123456789abcdef")
            .issue(&identity, Duration::hours(1))
            .unwrap();
        let genuine = state.issue(&identity, Duration::hours(1)).unwrap();

        let parts_with = |token: &str| {
            let (parts, _) = axum::http::Request::builder()
                .header(AUTHORIZATION, format!("Bearer {}", token))
                .body(())
                .unwrap()
                .into_parts();
            parts
        };

        let mut parts = parts_with(&forged);
        let err = RequestIdentity::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);

        let mut parts = parts_with(&genuine);
        let extracted = RequestIdentity::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(extracted, identity);
    }
}
