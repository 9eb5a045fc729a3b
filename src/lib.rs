//! CarNeeds - Marketplace Backend Library
//!
//! CarNeeds is the server side of a vehicle marketplace. This crate holds the
//! parts of it that carry real invariants: account signup and login, stateless
//! bearer-token authentication, role-gated administration, and the buyer/seller
//! chat system with per-conversation unread accounting.
//!
//! # Module Structure
//!
//! - **`shared`** - Wire types that cross the HTTP boundary
//!   - Roles and public user records
//!   - Chat summaries and message views
//!   - Validation error type
//!
//! - **`backend`** - The Axum server
//!   - Password hashing (bcrypt) and JWT issuance/verification
//!   - Identity extraction and role gating
//!   - Credential and message stores (PostgreSQL or in-memory)
//!   - Route handlers and router assembly
//!
//! # Usage
//!
//! ```rust,no_run
//! use carneeds::backend::server::{config::ServerConfig, init::create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(&config).await?;
//! let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::SharedError` for input validation failures
//! - `backend::error::ApiError` for everything a handler can return; it maps
//!   onto HTTP status codes and never leaks internal detail to clients

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
