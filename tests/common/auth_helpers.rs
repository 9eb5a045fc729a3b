//! Authentication test helpers
//!
//! Create users through the real signup/login endpoints and build
//! `Authorization` headers.

use axum::http::{HeaderValue, StatusCode};
use axum_test::{TestResponse, TestServer};
use carneeds::shared::Role;
use serde_json::json;

use super::TestApp;

/// A signed-up, logged-in user
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
    pub token: String,
}

impl TestUser {
    /// Value for the `Authorization` header
    pub fn auth(&self) -> HeaderValue {
        bearer(&self.token)
    }
}

/// `Bearer <token>`
pub fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {}", token)).expect("token is a valid header")
}

pub async fn signup(server: &TestServer, username: &str, user_type: &str) -> TestResponse {
    server
        .post("/api/signup")
        .json(&json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "phone": "0771234567",
            "userType": user_type,
            "password": "password123",
        }))
        .await
}

pub async fn login(server: &TestServer, email: &str, password: &str) -> TestResponse {
    server
        .post("/api/login")
        .json(&json!({ "email": email, "password": password }))
        .await
}

/// Sign up and log in a user with `role`. Admins are created as buyers and
/// promoted directly in the store.
pub async fn register(app: &TestApp, username: &str, role: Role) -> TestUser {
    let user_type = match role {
        Role::Seller => "seller",
        Role::Buyer | Role::Admin => "buyer",
    };

    let response = signup(&app.server, username, user_type).await;
    assert_eq!(response.status_code(), StatusCode::CREATED, "{}", response.text());
    let id = response.json::<serde_json::Value>()["id"]
        .as_i64()
        .expect("signup returns an id");

    if role == Role::Admin {
        assert!(app.store.set_role(id, Role::Admin).await);
    }

    let email = format!("{}@example.com", username);
    let response = login(&app.server, &email, "password123").await;
    assert_eq!(response.status_code(), StatusCode::OK, "{}", response.text());
    let token = response.json::<serde_json::Value>()["token"]
        .as_str()
        .expect("login returns a token")
        .to_string();

    TestUser {
        id,
        username: username.to_string(),
        email,
        password: "password123".to_string(),
        token,
    }
}
