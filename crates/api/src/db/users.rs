//! User repository for database operations.
//!
//! `Email` binds and `UserId` columns go through the core crate's sqlx
//! codecs. The stored email is fetched as text and re-parsed on the way out,
//! so a corrupt value in the database surfaces as
//! `RepositoryError::DataCorruption` instead of leaking outward.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use expense_tracker_core::{Email, UserId};

use super::RepositoryError;
use crate::models::user::User;

/// Raw `users` row as stored.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: UserId,
    email: String,
    username: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> Result<User, RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(User {
            id: self.id,
            email,
            username: self.username,
            created_at: self.created_at,
        })
    }
}

/// Raw `users` row including the stored password hash.
#[derive(sqlx::FromRow)]
struct UserCredentialsRow {
    id: UserId,
    email: String,
    username: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user by their email address (exact match).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored email is invalid.
    pub async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, email, username, created_at
            FROM expense_tracker.users
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    /// Get a user together with their stored password hash, by email.
    ///
    /// Returns `None` if no user with that email exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored email is invalid.
    pub async fn find_with_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, UserCredentialsRow>(
            r"
            SELECT id, email, username, password_hash, created_at
            FROM expense_tracker.users
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        let Some(r) = row else {
            return Ok(None);
        };

        let user = UserRow {
            id: r.id,
            email: r.email,
            username: r.username,
            created_at: r.created_at,
        }
        .into_user()?;

        Ok(Some((user, r.password_hash)))
    }

    /// Create a new user with email, username, and password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists - the
    /// `UNIQUE` constraint decides, so concurrent registrations for the same
    /// email resolve here rather than in the caller's pre-check.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        email: &Email,
        username: &str,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO expense_tracker.users (email, username, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, email, username, created_at
            ",
        )
        .bind(email)
        .bind(username)
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.into_user()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(clippy::extra_unused_type_parameters)]
    fn assert_pg_codec<T>()
    where
        T: sqlx::Type<sqlx::Postgres>
            + for<'q> sqlx::Encode<'q, sqlx::Postgres>
            + for<'r> sqlx::Decode<'r, sqlx::Postgres>,
    {
    }

    // Binding `Email` and decoding `UserId` in the queries above requires
    // the core crate's postgres codecs; this pins the bounds at compile time.
    #[test]
    fn test_domain_types_have_postgres_codecs() {
        assert_pg_codec::<Email>();
        assert_pg_codec::<UserId>();
    }

    #[test]
    fn test_corrupt_email_maps_to_data_corruption() {
        let row = UserRow {
            id: UserId::new(1),
            email: "not-an-email".to_owned(),
            username: "a".to_owned(),
            created_at: Utc::now(),
        };

        let err = row.into_user().expect_err("corrupt email must not pass");
        assert!(matches!(err, RepositoryError::DataCorruption(_)));
    }
}
