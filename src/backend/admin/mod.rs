//! Admin Module
//!
//! Role-gated user administration.
//!
//! - **`list_users`** - GET /api/admin/users
//! - **`update_user`** - PUT /api/admin/users/{id}

pub mod handlers;

pub use handlers::{list_users, update_user, AdminUserUpdate};
