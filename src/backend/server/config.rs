/**
 * Server Configuration
 *
 * Settings are read from environment variables (a `.env` file is loaded by
 * the binary before this runs). Everything except `JWT_SECRET` has a
 * default suitable for local development.
 *
 * | Variable | Default |
 * |---|---|
 * | `JWT_SECRET` | required, at least 32 bytes |
 * | `DATABASE_URL` | unset: in-memory store |
 * | `SERVER_PORT` | 3001 |
 * | `TOKEN_TTL_SECS` | 3600 |
 * | `BCRYPT_COST` | 10 |
 * | `REQUEST_TIMEOUT_SECS` | 30 |
 * | `DB_MAX_CONNECTIONS` | 10 |
 * | `DB_ACQUIRE_TIMEOUT_SECS` | 5 |
 * | `HASH_TIMEOUT_SECS` | 5 |
 */

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Shortest accepted signing secret, in bytes
pub const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Server configuration
#[derive(Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub jwt_secret: String,
    pub database_url: Option<String>,
    pub token_ttl: chrono::Duration,
    pub bcrypt_cost: u32,
    pub request_timeout: Duration,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
    pub hash_timeout: Duration,
}

impl ServerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from any name → value lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;
        if jwt_secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::Invalid {
                name: "JWT_SECRET",
                reason: format!("must be at least {} bytes", MIN_SECRET_LEN),
            });
        }

        let token_ttl_secs: i64 = parse_or(&lookup, "TOKEN_TTL_SECS", 3600)?;
        let token_ttl = chrono::Duration::try_seconds(token_ttl_secs)
            .filter(|ttl| *ttl > chrono::Duration::zero())
            .ok_or_else(|| ConfigError::Invalid {
                name: "TOKEN_TTL_SECS",
                reason: "must be a positive number of seconds".to_string(),
            })?;

        Ok(Self {
            port: parse_or(&lookup, "SERVER_PORT", 3001)?,
            jwt_secret,
            database_url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
            token_ttl,
            bcrypt_cost: parse_or(&lookup, "BCRYPT_COST", 10)?,
            request_timeout: Duration::from_secs(parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30)?),
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?,
            db_acquire_timeout: Duration::from_secs(parse_or(
                &lookup,
                "DB_ACQUIRE_TIMEOUT_SECS",
                5,
            )?),
            hash_timeout: Duration::from_secs(parse_or(&lookup, "HASH_TIMEOUT_SECS", 5)?),
        })
    }

    pub fn server_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("port", &self.port)
            .field("jwt_secret", &"<redacted>")
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("token_ttl", &self.token_ttl)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("request_timeout", &self.request_timeout)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_acquire_timeout", &self.db_acquire_timeout)
            .field("hash_timeout", &self.hash_timeout)
            .finish()
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
