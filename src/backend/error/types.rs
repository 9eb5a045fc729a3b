/**
 * Backend Error Types
 *
 * `ApiError` is the single error type HTTP handlers return. Each variant
 * corresponds to one class of failure and one status code. Lower layers
 * (stores, token verification) have their own error types which convert
 * into `ApiError` here, so handlers can use `?` throughout.
 */

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::sessions::TokenError;
use crate::backend::store::StoreError;
use crate::shared::SharedError;

/// Generic message returned for every internal failure
pub const INTERNAL_MESSAGE: &str = "Internal server error";

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use carneeds::backend::error::ApiError;
/// use axum::http::StatusCode;
///
/// let err = ApiError::conflict("User with this email or username already exists.");
/// assert_eq!(err.status_code(), StatusCode::CONFLICT);
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or incomplete input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Input rejected by a shared validation rule
    #[error(transparent)]
    Shared(#[from] SharedError),

    /// No usable credentials: missing bearer token or failed login
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// A bearer token was presented but did not verify or has expired
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Verified identity lacking the required role or participation
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Uniqueness constraint violated
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Anything unclassified. The message is logged, never sent.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Shared(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::InvalidToken(_) | Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to send to the client
    pub fn client_message(&self) -> String {
        match self {
            Self::Validation(message)
            | Self::Unauthenticated(message)
            | Self::InvalidToken(message)
            | Self::Forbidden(message)
            | Self::Conflict(message)
            | Self::NotFound(message) => message.clone(),
            Self::Shared(err) => err.client_message().to_string(),
            Self::Internal(_) => INTERNAL_MESSAGE.to_string(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(message) => Self::Conflict(message),
            StoreError::NotFound(what) => Self::NotFound(format!("{} not found", what)),
            StoreError::Rejected(reason) => Self::Validation(reason.to_string()),
            StoreError::Corrupt(_) | StoreError::Database(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid | TokenError::Expired => {
                Self::InvalidToken("Invalid or expired token".to_string())
            }
            TokenError::Signing(message) => Self::Internal(message),
        }
    }
}

// Extractor rejections carry serde's wording, which stays in the logs.

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(
            status = rejection.status().as_u16(),
            "Rejected request body: {}",
            rejection.body_text()
        );
        match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                Self::Validation("Expected a JSON request body".to_string())
            }
            _ => Self::Validation("Invalid request body".to_string()),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("Rejected path parameters: {}", rejection.body_text());
        Self::Validation("Invalid path parameter".to_string())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!("Rejected query string: {}", rejection.body_text());
        Self::Validation("Invalid query parameters".to_string())
    }
}
