//! Backend Module
//!
//! All server-side code for CarNeeds: an Axum HTTP server exposing signup,
//! login, profile, chat and admin endpoints over a pluggable store.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - Router assembly and tower layers
//! - **`auth`** - Password hashing, JWT tokens, signup/login/profile handlers
//! - **`middleware`** - Identity extraction and role gating
//! - **`chat`** - Chat store contract, summary aggregation, chat handlers
//! - **`admin`** - Role-gated user administration
//! - **`store`** - PostgreSQL and in-memory store backends
//! - **`error`** - `ApiError` and its HTTP conversion
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Config, state, init
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── middleware/     - Identity and role gate extractors
//! ├── chat/           - Chat summaries and messaging
//! ├── admin/          - Administration
//! ├── store/          - Store backends
//! └── error/          - Error types
//! ```
//!
//! # Request Flow
//!
//! 1. `POST /api/login` verifies the password and mints a signed token
//! 2. Clients send `Authorization: Bearer <token>` on protected routes
//! 3. The `RequestIdentity` extractor verifies the token (401 when missing,
//!    403 when invalid or expired) and hands the identity to the handler
//! 4. Role-gated handlers take `Authorized<Policy>`, which can only be built
//!    from an already-verified identity
//!
//! # State Management
//!
//! `AppState` holds only read-only or internally synchronized values: the
//! token keys, the password hasher and `Arc<dyn …Store>` handles. Conflicting
//! writes are serialized by the store's unique constraints and transactions.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Authentication and user management
pub mod auth;

/// Identity extraction and role gating
pub mod middleware;

/// Chat summaries and messaging
pub mod chat;

/// Role-gated administration
pub mod admin;

/// Store backends
pub mod store;

/// Backend error types
pub mod error;

/// Request extractors that reject with `ApiError`
pub mod extract;

/// Re-export commonly used types
pub use server::{create_app, AppState};
pub use error::ApiError;
