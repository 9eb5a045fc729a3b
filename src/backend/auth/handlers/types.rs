/**
 * Authentication Handler Types
 *
 * Request and response bodies for the signup, login and profile handlers.
 *
 * Request fields default to empty so that a missing field is reported by
 * the handler's own validation (400 with a field message) instead of by the
 * JSON extractor.
 */

use serde::{Deserialize, Serialize};

use crate::shared::error::{require_non_blank, SharedError};
use crate::shared::Role;

/// Sign up request
#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct SignupRequest {
    /// Display name. Older clients send it as `name`.
    #[serde(default, alias = "name")]
    pub username: String,
    #[serde(default)]
    pub email: String,
    /// Plaintext password, hashed before storage
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub phone: String,
    /// `"buyer"`, `"seller"` or `"both"`. Decides the initial role.
    #[serde(default, rename = "userType", skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
}

impl SignupRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        require_non_blank("username", &self.username)?;
        require_non_blank("email", &self.email)?;
        require_email(&self.email)?;
        require_non_blank("password", &self.password)?;
        Ok(())
    }

    pub fn role(&self) -> Role {
        Role::from_user_type(self.user_type.as_deref())
    }
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        require_non_blank("email", &self.email)?;
        require_non_blank("password", &self.password)?;
        Ok(())
    }
}

/// Login response
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginResponse {
    /// Signed session token for the `Authorization: Bearer` header
    pub token: String,
    pub role: Role,
}

/// Profile update request, also used by the admin edit endpoint
#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct ProfileUpdateRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl ProfileUpdateRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        require_non_blank("username", &self.username)?;
        require_non_blank("email", &self.email)?;
        require_email(&self.email)
    }
}

fn require_email(email: &str) -> Result<(), SharedError> {
    if !email.contains('@') {
        return Err(SharedError::validation("email", "Invalid email format"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_accepts_name_alias() {
        let request: SignupRequest = serde_json::from_value(serde_json::json!({
            "name": "alice",
            "email": "a@x.com",
            "password": "secret1",
            "phone": "0771234567",
            "userType": "both"
        }))
        .unwrap();

        assert_eq!(request.username, "alice");
        assert_eq!(request.role(), Role::Seller);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_signup_missing_field_is_validation_error() {
        let request: SignupRequest = serde_json::from_value(serde_json::json!({
            "username": "alice",
            "password": "secret1",
            "phone": "0771234567"
        }))
        .unwrap();

        let err = request.validate().unwrap_err();
        assert_eq!(err.field(), Some("email"));
        assert_eq!(request.role(), Role::Buyer);
    }

    #[test]
    fn test_login_rejects_blank_password() {
        let request = LoginRequest {
            email: "a@x.com".to_string(),
            password: "  ".to_string(),
        };
        assert_eq!(request.validate().unwrap_err().field(), Some("password"));
    }

    #[test]
    fn test_email_needs_at_sign() {
        let request = SignupRequest {
            username: "alice".to_string(),
            email: "alice.example.com".to_string(),
            password: "secret1".to_string(),
            ..Default::default()
        };
        let err = request.validate().unwrap_err();
        assert_eq!(err.client_message(), "Invalid email format");

        let update = ProfileUpdateRequest {
            username: "alice".to_string(),
            email: "nope".to_string(),
            phone: String::new(),
        };
        assert!(update.validate().is_err());
    }
}
