//! Shared Error Types
//!
//! Errors describing bad input. Handlers raise these when a request body is
//! well-formed JSON but its content is unusable; the backend maps them onto
//! `400 Bad Request`.
//!
//! # Usage
//!
//! ```rust
//! use carneeds::shared::error::SharedError;
//!
//! let error = SharedError::validation("email", "Email must contain '@'");
//! assert_eq!(error.field(), Some("email"));
//! ```
use thiserror::Error;

/// Shared error types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The offending field, if the error names one
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::ValidationError { field, .. } => Some(field),
        }
    }

    /// Message suitable for returning to the client
    pub fn client_message(&self) -> &str {
        match self {
            Self::ValidationError { message, .. } => message,
        }
    }
}

/// Reject blank (empty or whitespace-only) required fields.
pub fn require_non_blank(field: &str, value: &str) -> Result<(), SharedError> {
    if value.trim().is_empty() {
        return Err(SharedError::validation(field, format!("{} is required", field)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = SharedError::validation("password", "Password is required");
        assert_eq!(error.field(), Some("password"));
        assert_eq!(error.client_message(), "Password is required");
        assert!(error.to_string().contains("password"));
    }

    #[test]
    fn test_require_non_blank() {
        assert!(require_non_blank("email", "a@x.com").is_ok());
        let err = require_non_blank("email", "   ").unwrap_err();
        assert_eq!(err.client_message(), "email is required");
    }
}
