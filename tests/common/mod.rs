//! Common test utilities and helpers
//!
//! Every integration suite drives the full router over a fresh
//! `MemoryStore`, so tests need no database and do not interfere.

#![allow(dead_code)]

pub mod auth_helpers;

use std::sync::Arc;

use axum_test::TestServer;
use carneeds::backend::routes::create_router;
use carneeds::backend::server::{AppState, ServerConfig};
use carneeds::backend::store::MemoryStore;

pub use auth_helpers::*;

pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

/// Configuration with the cheapest bcrypt cost and a fixed secret
pub fn test_config() -> ServerConfig {
    ServerConfig::from_lookup(|name| match name {
        "JWT_SECRET" => Some(TEST_SECRET.to_string()),
        "BCRYPT_COST" => Some("4".to_string()),
        _ => None,
    })
    .expect("test configuration is valid")
}

/// A running test server plus direct handles on its store and state
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryStore>,
    pub state: AppState,
}

pub fn test_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::with_store(store.clone(), &test_config()).expect("hasher builds");
    let server = TestServer::new(create_router(state.clone())).expect("test server starts");

    TestApp {
        server,
        store,
        state,
    }
}
