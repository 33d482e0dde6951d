//! User domain types.
//!
//! These types represent validated domain objects separate from database row
//! types. The password hash is deliberately not part of [`User`]; handlers
//! that need it get it from the repository as a separate value.

use chrono::{DateTime, Utc};

use expense_tracker_core::{Email, UserId};

/// A registered account (domain type).
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address, unique across all accounts.
    pub email: Email,
    /// Display name; not unique.
    pub username: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
