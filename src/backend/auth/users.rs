/**
 * User Model and Store Contract
 *
 * The full user record (including the password hash) and the operations the
 * auth and admin handlers need from storage. Backends live in
 * `crate::backend::store`.
 *
 * Usernames and emails are unique across all users. Backends report a
 * violation as `StoreError::Conflict` rather than checking first, so two
 * concurrent signups for the same email cannot both succeed.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::backend::store::StoreError;
use crate::shared::{PublicUser, Role};

/// User struct representing a stored account
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    /// Unique display name
    pub username: String,
    /// Unique email address, used as the login identifier
    pub email: String,
    pub phone: String,
    pub role: Role,
    /// bcrypt hash; never leaves the backend
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Projection safe to return to clients
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            role: self.role,
            created_at: self.created_at,
        }
    }
}

/// Fields for a new account. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub password_hash: String,
}

/// Editable profile fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub username: String,
    pub email: String,
    pub phone: String,
}

/// Account storage
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user.
    ///
    /// Returns `StoreError::Conflict` when the username or email is taken.
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn user_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;

    /// Replace a user's username, email and phone.
    ///
    /// `Ok(None)` when the user does not exist.
    async fn update_profile(
        &self,
        id: i64,
        update: ProfileUpdate,
    ) -> Result<Option<User>, StoreError>;

    /// Every user, ordered by id
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    /// Replace a non-admin user's profile fields and role.
    ///
    /// `Ok(None)` when the user does not exist or is an admin.
    async fn admin_update_user(
        &self,
        id: i64,
        update: ProfileUpdate,
        role: Role,
    ) -> Result<Option<User>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_projection_drops_hash() {
        let user = User {
            id: 9,
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            phone: "0771234567".to_string(),
            role: Role::Seller,
            password_hash: "$2b$04$abcdefghijklmnopqrstuv".to_string(),
            created_at: Utc::now(),
        };

        let public = user.to_public();
        assert_eq!(public.id, 9);
        assert_eq!(public.role, Role::Seller);

        let json = serde_json::to_string(&public).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("$2b$"));
    }
}
