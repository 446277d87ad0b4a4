//! Database operations for the Mobile Shop `PostgreSQL` store.
//!
//! ## Tables
//!
//! - `shop_user` - Registered users (credentials, profile, issued token)
//! - `product` - Read-only phone catalog
//! - `cart` / `cart_item` - One cart per user, one line per product
//! - `order_line` - Append-only order history, one row per purchased line
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and applied at startup
//! via `sqlx::migrate!`.

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub mod carts;
pub mod orders;
pub mod products;
pub mod users;

/// How many times a failed initial connection is retried.
const CONNECT_RETRIES: u32 = 4;

/// Pause between connection attempts.
const CONNECT_BACKOFF: Duration = Duration::from_secs(5);

/// Errors returned by repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., unique username).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Create a pool, retrying a bounded number of times with a fixed backoff.
///
/// The process must not serve traffic against a broken store, so the caller
/// is expected to abort startup when this returns an error.
///
/// # Errors
///
/// Returns the last `sqlx::Error` once all attempts are exhausted.
pub async fn connect_with_retry(
    database_url: &secrecy::SecretString,
) -> Result<PgPool, sqlx::Error> {
    let mut attempt = 0;
    loop {
        tracing::info!(attempt, "connecting to database");
        match create_pool(database_url).await {
            Ok(pool) => {
                tracing::info!("database connection established");
                return Ok(pool);
            }
            Err(err) if attempt < CONNECT_RETRIES => {
                tracing::warn!(error = %err, attempt, "database connection failed, retrying");
                attempt += 1;
                tokio::time::sleep(CONNECT_BACKOFF).await;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Map a sqlx error to `Conflict` when it is a unique violation.
pub(crate) fn map_unique_violation(err: sqlx::Error, message: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(message.to_owned());
    }
    RepositoryError::Database(err)
}
