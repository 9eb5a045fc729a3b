//! Route Configuration Module
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs           - Module exports and documentation
//! ├── router.rs        - Router assembly and tower layers
//! ├── api_routes.rs    - Signup, login, profile, health
//! ├── chat_routes.rs   - Chats, messages, seller inbox
//! └── admin_routes.rs  - User administration
//! ```
//!
//! Every route lives under `/api`. Unknown paths fall through to axum's
//! default 404.

/// Main router creation
pub mod router;

/// Account and service routes
pub mod api_routes;

/// Chat routes
pub mod chat_routes;

/// Admin routes
pub mod admin_routes;

pub use router::create_router;
