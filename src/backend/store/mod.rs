//! Store Backends
//!
//! Implementations of `UserStore` and `ChatStore`.
//!
//! - **`postgres`** - `PgStore`, the production backend over a `PgPool`
//! - **`memory`** - `MemoryStore`, used by tests and when no
//!   `DATABASE_URL` is configured
//!
//! Both backends enforce the same constraints: unique username and email,
//! one chat per (vehicle, buyer, seller), and atomic message posting.

use thiserror::Error;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Store-level failures
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint was violated. Carries the constraint name.
    #[error("unique constraint violated: {0}")]
    Conflict(String),

    /// A record the operation depends on does not exist
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The operation is not allowed for this input
    #[error("rejected: {0}")]
    Rejected(&'static str),

    /// A stored value could not be decoded
    #[error("corrupt record: {0}")]
    Corrupt(String),

    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                let constraint = db_err.constraint().unwrap_or("unique").to_string();
                return Self::Conflict(constraint);
            }
        }
        Self::Database(err)
    }
}
