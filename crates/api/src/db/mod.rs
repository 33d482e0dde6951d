//! Database operations for the expense tracker `PostgreSQL` store.
//!
//! # Schema: `expense_tracker`
//!
//! ## Tables
//!
//! - `users` - Registered accounts (unique email, bcrypt password hash)
//!
//! The schema and its tables are created idempotently at startup by
//! [`ensure_schema`], before the HTTP listener starts accepting connections.
//! There is no separate migration step.

pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
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

/// Create the `expense_tracker` schema and its tables if absent.
///
/// Safe to call on every startup; both statements are no-ops when the
/// objects already exist. The `UNIQUE` constraint on `email` is the source
/// of truth for duplicate registrations - the workflow's pre-check is only a
/// fast path (concurrent inserts are serialized here, not in application
/// code).
///
/// # Errors
///
/// Returns `sqlx::Error` if either statement fails.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("CREATE SCHEMA IF NOT EXISTS expense_tracker")
        .execute(pool)
        .await?;

    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS expense_tracker.users (
            id            SERIAL PRIMARY KEY,
            email         TEXT NOT NULL UNIQUE,
            username      TEXT NOT NULL,
            password_hash TEXT NOT NULL,
            created_at    TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        ",
    )
    .execute(pool)
    .await?;

    Ok(())
}
