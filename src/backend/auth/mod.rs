//! Authentication Module
//!
//! Account registration, login and profile management, plus the two
//! primitives every protected route builds on: password hashing and signed
//! session tokens.
//!
//! # Architecture
//!
//! - **`password`** - bcrypt hashing on the blocking pool
//! - **`sessions`** - JWT issue and verification
//! - **`users`** - User model and the `UserStore` contract
//! - **`handlers`** - HTTP handlers for signup, login and profile
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── password.rs     - Password hashing
//! ├── sessions.rs     - JWT token management
//! ├── users.rs        - User model and store trait
//! └── handlers/       - HTTP handlers
//!     ├── mod.rs      - Handler exports
//!     ├── types.rs    - Request/response types
//!     ├── signup.rs   - User registration handler
//!     ├── login.rs    - User authentication handler
//!     └── profile.rs  - Profile read/update handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Signup**: username, email, password and phone → user created (201)
//! 2. **Login**: email and password → `{ token, role }`
//! 3. **Profile**: bearer token → own record, or an update of it
//!
//! # Security
//!
//! - Passwords are stored only as salted bcrypt hashes
//! - Tokens are HS256-signed and expire after the configured TTL
//! - Both login failure paths return the same 401 body, and an unknown email
//!   still pays for one bcrypt verification

/// Password hashing
pub mod password;

/// JWT token generation and validation
pub mod sessions;

/// User model and store contract
pub mod users;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use password::PasswordHasher;
pub use sessions::{Claims, RequestIdentity, TokenError, TokenKeys};
pub use users::{NewUser, ProfileUpdate, User, UserStore};
pub use handlers::{get_profile, login, signup, update_profile};
pub use handlers::types::{LoginRequest, LoginResponse, ProfileUpdateRequest, SignupRequest};
