//! Middleware Module
//!
//! Request guards that run before handlers, written as axum extractors so
//! the verified identity reaches the handler as an ordinary argument.
//!
//! - **`auth`** - Bearer token → `RequestIdentity`
//! - **`role_gate`** - `RequestIdentity` → `Authorized<Policy>`
//!
//! # Example
//!
//! ```rust,no_run
//! use carneeds::backend::middleware::{AdminOnly, Authorized};
//!
//! async fn admin_only(admin: Authorized<AdminOnly>) -> String {
//!     format!("hello, {}", admin.username)
//! }
//! ```

pub mod auth;
pub mod role_gate;

pub use auth::{authenticate, bearer_token};
pub use role_gate::{authorize, AdminOnly, Authorized, RolePolicy, SellerOrAdmin};
