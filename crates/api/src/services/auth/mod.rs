//! Authentication service.
//!
//! Implements the register and login workflows over the user repository.
//! Passwords are hashed with bcrypt at a fixed work factor; hashing and
//! verification run on the blocking thread pool because bcrypt is CPU-bound
//! by design.

mod error;

pub use error::AuthError;

use sqlx::PgPool;

use expense_tracker_core::Email;

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::user::User;

/// bcrypt work factor for newly stored hashes.
const HASH_COST: u32 = 10;

/// Authentication service.
///
/// Handles user registration and login. Each call is a single linear
/// decision path; no session state is kept.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new user with email, username, and password.
    ///
    /// The duplicate pre-check is only a fast path for a friendly error; the
    /// database unique constraint is authoritative, so a concurrent
    /// registration that wins the race still comes back as
    /// `UserAlreadyExists` rather than a server error.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn register(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let email = Email::parse(email)?;

        // Fast path: friendly error without paying for a hash
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AuthError::UserAlreadyExists);
        }

        // No strength requirements: an empty password is hashed as-is
        let password_hash = hash_password(password.to_owned()).await?;

        let user = self
            .users
            .create(&email, username, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(user)
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::UserNotFound` if no account has that email.
    /// Returns `AuthError::InvalidCredentials` if the password is wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::parse(email)?;

        let (user, password_hash) = self
            .users
            .find_with_password_hash(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        verify_password(password.to_owned(), password_hash).await?;

        Ok(user)
    }
}

/// Hash a password with bcrypt at [`HASH_COST`].
///
/// Runs on the blocking pool so the hash does not stall the async executor.
async fn hash_password(password: String) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, HASH_COST))
        .await
        .map_err(|_| AuthError::PasswordHash)?
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored bcrypt hash.
///
/// An unparseable stored hash is reported as `InvalidCredentials`, the same
/// as a mismatch; nothing about the stored value leaks to the caller.
async fn verify_password(password: String, hash: String) -> Result<(), AuthError> {
    let valid = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|_| AuthError::PasswordHash)?
        .map_err(|_| AuthError::InvalidCredentials)?;

    if valid {
        Ok(())
    } else {
        Err(AuthError::InvalidCredentials)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_then_verify_roundtrip() {
        let hash = hash_password("secret".to_owned()).await.unwrap();
        verify_password("secret".to_owned(), hash).await.unwrap();
    }

    #[tokio::test]
    async fn test_hash_is_not_plaintext() {
        let hash = hash_password("secret".to_owned()).await.unwrap();
        assert_ne!(hash, "secret");
        // bcrypt modular crypt format
        assert!(hash.starts_with("$2"));
    }

    #[tokio::test]
    async fn test_hashes_are_salted() {
        let a = hash_password("secret".to_owned()).await.unwrap();
        let b = hash_password("secret".to_owned()).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_wrong_password_rejected() {
        let hash = hash_password("secret".to_owned()).await.unwrap();
        let err = verify_password("wrong".to_owned(), hash).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_empty_password_is_hashed_as_is() {
        let hash = hash_password(String::new()).await.unwrap();
        verify_password(String::new(), hash.clone()).await.unwrap();

        let err = verify_password("not-empty".to_owned(), hash)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_garbage_stored_hash_is_invalid_credentials() {
        let err = verify_password("secret".to_owned(), "not-a-bcrypt-hash".to_owned())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[test]
    fn test_hash_cost_is_fixed_at_ten() {
        assert_eq!(HASH_COST, 10);
    }
}
