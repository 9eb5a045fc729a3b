//! Authentication Handlers Module
//!
//! HTTP handlers for account endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── signup.rs   - User registration handler
//! ├── login.rs    - User authentication handler
//! └── profile.rs  - Profile read/update handlers
//! ```
//!
//! # Handlers
//!
//! - **`signup`** - POST /api/signup - User registration
//! - **`login`** - POST /api/login - User authentication
//! - **`get_profile`** - GET /api/profile - Current user's record
//! - **`update_profile`** - PUT /api/profile - Edit own username/email/phone
//!
//! # Example
//!
//! ```rust,no_run
//! use carneeds::backend::auth::handlers::{signup, login, get_profile, update_profile};
//! use carneeds::backend::AppState;
//! use axum::{routing::{get, post}, Router};
//!
//! # fn example() -> Router<AppState> {
//! Router::new()
//!     .route("/api/signup", post(signup))
//!     .route("/api/login", post(login))
//!     .route("/api/profile", get(get_profile).put(update_profile))
//! # }
//! ```

/// Request and response types
pub mod types;

/// Signup handler
pub mod signup;

/// Login handler
pub mod login;

/// Profile handlers
pub mod profile;

// Re-export commonly used types
pub use types::{LoginRequest, LoginResponse, ProfileUpdateRequest, SignupRequest};

// Re-export handlers
pub use signup::signup;
pub use login::login;
pub use profile::{get_profile, update_profile};
