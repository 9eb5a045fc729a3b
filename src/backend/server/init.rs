/**
 * Server Initialization
 *
 * Builds the store, the application state and the router from a
 * `ServerConfig`.
 *
 * # Initialization Process
 *
 * 1. With `DATABASE_URL`: connect a bounded `PgPool` and run migrations.
 *    Without it: fall back to the in-memory store and say so loudly.
 * 2. Derive token keys and the password hasher from configuration
 * 3. Create the router with all routes and layers
 *
 * Unlike a missing `DATABASE_URL`, a configured database that cannot be
 * reached is fatal.
 */

use std::sync::Arc;

use axum::Router;
use thiserror::Error;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::AppState;
use crate::backend::store::{MemoryStore, PgStore};

#[derive(Debug, Error)]
pub enum InitError {
    #[error("database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("database migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("invalid BCRYPT_COST: {0}")]
    Hasher(#[from] bcrypt::BcryptError),
}

/// Build the application state for `config`
pub async fn create_state(config: &ServerConfig) -> Result<AppState, InitError> {
    match &config.database_url {
        Some(url) => {
            tracing::info!("Connecting to database...");
            let store = PgStore::connect(url, config.db_max_connections, config.db_acquire_timeout)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to create database connection pool: {}", e);
                    e
                })?;
            tracing::info!("Database connection pool created successfully");

            tracing::info!("Running database migrations...");
            store.migrate().await?;
            tracing::info!("Database migrations completed successfully");

            Ok(AppState::with_store(Arc::new(store), config)?)
        }
        None => {
            tracing::warn!("DATABASE_URL not set. Using the in-memory store; data will not persist.");
            Ok(AppState::with_store(Arc::new(MemoryStore::new()), config)?)
        }
    }
}

/// Create and configure the Axum application
pub async fn create_app(config: &ServerConfig) -> Result<Router, InitError> {
    tracing::info!("Initializing CarNeeds backend server");

    let state = create_state(config).await?;
    let app = create_router(state);

    tracing::info!("Router configured");
    Ok(app)
}
