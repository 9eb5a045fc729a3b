//! Authentication API integration tests
//!
//! Signup, login, profile and the bearer-token guard, driven through the
//! full router.

mod common;

use axum::http::{header::AUTHORIZATION, HeaderValue, StatusCode};
use carneeds::backend::auth::RequestIdentity;
use carneeds::shared::Role;
use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use common::{bearer, login, register, signup, test_app};

#[tokio::test]
async fn test_signup_login_round_trip() {
    let app = test_app();

    let response = app
        .server
        .post("/api/signup")
        .json(&json!({
            "username": "alice",
            "email": "a@x.com",
            "phone": "0771234567",
            "userType": "buyer",
            "password": "secret123"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let user: Value = response.json();
    assert_eq!(user["username"], "alice");
    assert_eq!(user["email"], "a@x.com");
    assert_eq!(user["phone"], "0771234567");
    assert_eq!(user["role"], "buyer");
    assert!(user["id"].is_i64());
    assert!(user.get("created_at").is_some());
    assert!(user.get("password").is_none());
    assert!(user.get("password_hash").is_none());

    let response = login(&app.server, "a@x.com", "secret123").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["role"], "buyer");

    let token = body["token"].as_str().unwrap();
    let claims = app.state.tokens.verify(token).unwrap();
    assert_eq!(claims.role, Role::Buyer);
    assert_eq!(claims.username, "alice");
    assert_eq!(claims.exp - claims.iat, 3600);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = test_app();
    register(&app, "alice", Role::Buyer).await;

    let wrong_password = login(&app.server, "alice@example.com", "wrong").await;
    let unknown_email = login(&app.server, "nobody@example.com", "password123").await;

    assert_eq!(wrong_password.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.text(), unknown_email.text());

    let body: Value = wrong_password.json();
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_requires_fields() {
    let app = test_app();
    let response = app
        .server
        .post("/api/login")
        .json(&json!({ "email": "a@x.com" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_bodies_are_400_json() {
    let app = test_app();

    // Wrong field type
    let response = app
        .server
        .post("/api/login")
        .json(&json!({ "email": 5, "password": "x" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Invalid request body", "status": 400 })
    );

    // Truncated JSON
    let response = app
        .server
        .post("/api/login")
        .content_type("application/json")
        .bytes("{\"email\":".into())
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "Invalid request body");

    // Not JSON at all
    let response = app.server.post("/api/signup").text("username=alice").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Expected a JSON request body", "status": 400 })
    );
    assert!(!response.text().contains("Content-Type"));
}

#[tokio::test]
async fn test_malformed_profile_update_is_400_json() {
    let app = test_app();
    let user = register(&app, "alice", Role::Buyer).await;

    let response = app
        .server
        .put("/api/profile")
        .add_header(AUTHORIZATION, user.auth())
        .json(&json!({ "username": ["alice"], "email": "alice@example.com" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["status"], 400);
}

#[tokio::test]
async fn test_duplicate_signup_conflicts() {
    let app = test_app();
    assert_eq!(signup(&app.server, "alice", "buyer").await.status_code(), StatusCode::CREATED);

    let again = signup(&app.server, "alice", "buyer").await;
    assert_eq!(again.status_code(), StatusCode::CONFLICT);
    let body: Value = again.json();
    assert_eq!(body["error"], "User with this email or username already exists.");
    assert_eq!(body["status"], 409);

    // Same username, different email
    let response = app
        .server
        .post("/api/signup")
        .json(&json!({
            "username": "alice",
            "email": "other@example.com",
            "password": "password123"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);

    // A fresh email still works and can log in
    assert_eq!(signup(&app.server, "bob", "buyer").await.status_code(), StatusCode::CREATED);
    assert_eq!(
        login(&app.server, "bob@example.com", "password123").await.status_code(),
        StatusCode::OK
    );
}

#[tokio::test]
async fn test_signup_validation() {
    let app = test_app();

    for body in [
        json!({ "email": "a@x.com", "password": "secret123" }),
        json!({ "username": "alice", "password": "secret123" }),
        json!({ "username": "alice", "email": "a@x.com" }),
        json!({ "username": "alice", "email": "not-an-email", "password": "secret123" }),
        json!({ "username": "   ", "email": "a@x.com", "password": "secret123" }),
    ] {
        let response = app.server.post("/api/signup").json(&body).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{}", body);
    }
}

#[tokio::test]
async fn test_signup_role_from_user_type() {
    let app = test_app();

    let response = app
        .server
        .post("/api/signup")
        .json(&json!({
            "name": "sam",
            "email": "sam@example.com",
            "password": "password123",
            "userType": "both"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let user: Value = response.json();
    assert_eq!(user["username"], "sam");
    assert_eq!(user["role"], "seller");

    let response = app
        .server
        .post("/api/signup")
        .json(&json!({
            "username": "mallory",
            "email": "m@example.com",
            "password": "password123",
            "userType": "admin"
        }))
        .await;
    let user: Value = response.json();
    assert_eq!(user["role"], "buyer");
}

#[tokio::test]
async fn test_missing_token_is_401() {
    let app = test_app();
    let response = app.server.get("/api/profile").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = app
        .server
        .get("/api/profile")
        .add_header(AUTHORIZATION, HeaderValue::from_static("Token abc"))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_bad_token_is_403() {
    let app = test_app();
    let response = app
        .server
        .get("/api/profile")
        .add_header(AUTHORIZATION, bearer("garbage"))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_expired_token_is_403() {
    let app = test_app();
    let alice = register(&app, "alice", Role::Buyer).await;

    let identity = RequestIdentity {
        id: alice.id,
        username: alice.username.clone(),
        role: Role::Buyer,
    };
    let two_hours_ago = Utc::now().timestamp() - 7200;
    let expired = app
        .state
        .tokens
        .issue_at(&identity, Duration::hours(1), two_hours_ago)
        .unwrap();

    let response = app
        .server
        .get("/api/profile")
        .add_header(AUTHORIZATION, bearer(&expired))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_profile_read_and_update() {
    let app = test_app();
    let alice = register(&app, "alice", Role::Buyer).await;
    register(&app, "bob", Role::Buyer).await;

    let response = app
        .server
        .get("/api/profile")
        .add_header(AUTHORIZATION, alice.auth())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let profile: Value = response.json();
    assert_eq!(profile["id"], alice.id);
    assert_eq!(profile["email"], "alice@example.com");

    let response = app
        .server
        .put("/api/profile")
        .add_header(AUTHORIZATION, alice.auth())
        .json(&json!({
            "username": "alice_k",
            "email": "alice@example.com",
            "phone": "0719999999"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let profile: Value = response.json();
    assert_eq!(profile["username"], "alice_k");
    assert_eq!(profile["phone"], "0719999999");

    let response = app
        .server
        .put("/api/profile")
        .add_header(AUTHORIZATION, alice.auth())
        .json(&json!({
            "username": "alice_k",
            "email": "bob@example.com",
            "phone": ""
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_profile_of_deleted_account_is_404() {
    let app = test_app();
    let ghost = RequestIdentity {
        id: 999,
        username: "ghost".to_string(),
        role: Role::Buyer,
    };
    let token = app.state.tokens.issue(&ghost, Duration::hours(1)).unwrap();

    let response = app
        .server
        .get("/api/profile")
        .add_header(AUTHORIZATION, bearer(&token))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health() {
    let app = test_app();
    let response = app.server.get("/api/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
}
