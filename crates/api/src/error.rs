//! Unified error handling at the request-handler boundary.
//!
//! Every handler returns `Result<T, AppError>`. The `IntoResponse`
//! implementation converts the error taxonomy to the documented status codes
//! and a JSON string body, captures server-class errors to Sentry, and never
//! exposes internal detail to the caller.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed outside the auth workflow.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),
}

impl AppError {
    /// Status code for this error.
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(err) => match err {
                AuthError::UserAlreadyExists => StatusCode::CONFLICT,
                AuthError::UserNotFound => StatusCode::NOT_FOUND,
                AuthError::InvalidCredentials | AuthError::InvalidEmail(_) => {
                    StatusCode::BAD_REQUEST
                }
                AuthError::PasswordHash | AuthError::Repository(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    /// Client-facing message; internal detail stays out of the body.
    fn client_message(&self) -> &'static str {
        match self {
            Self::Database(_) => "Internal server error",
            Self::Auth(err) => match err {
                AuthError::UserAlreadyExists => "User already exists",
                AuthError::UserNotFound => "User not found",
                AuthError::InvalidCredentials => "Wrong email or password",
                AuthError::InvalidEmail(_) => "Invalid email address",
                AuthError::PasswordHash | AuthError::Repository(_) => "Internal server error",
            },
        }
    }

    /// Whether this is a server-class fault worth reporting.
    fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        (self.status_code(), Json(self.client_message())).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::Auth(AuthError::UserAlreadyExists);
        assert_eq!(err.to_string(), "Auth error: user already exists");

        let err = AppError::Database(RepositoryError::Conflict("email".to_string()));
        assert_eq!(
            err.to_string(),
            "Database error: constraint violation: email"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Auth(AuthError::UserAlreadyExists).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Auth(AuthError::UserNotFound).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Auth(AuthError::InvalidCredentials).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Auth(AuthError::PasswordHash).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Database(RepositoryError::DataCorruption("bad row".to_string()))
                .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_client_messages_hide_internals() {
        let err = AppError::Database(RepositoryError::DataCorruption(
            "invalid email in database: user row 17".to_string(),
        ));
        assert_eq!(err.client_message(), "Internal server error");

        let err = AppError::Auth(AuthError::Repository(RepositoryError::Conflict(
            "email already exists".to_string(),
        )));
        assert_eq!(err.client_message(), "Internal server error");
    }

    #[test]
    fn test_duplicate_user_message() {
        let err = AppError::Auth(AuthError::UserAlreadyExists);
        assert_eq!(err.client_message(), "User already exists");
    }

    #[test]
    fn test_not_found_distinct_from_bad_password() {
        let not_found = AppError::Auth(AuthError::UserNotFound);
        let bad_password = AppError::Auth(AuthError::InvalidCredentials);
        assert_ne!(not_found.status_code(), bad_password.status_code());
    }

    #[test]
    fn test_invalid_email_maps_from_parse_error() {
        let parse_err = expense_tracker_core::Email::parse("nope").unwrap_err();
        let err = AppError::Auth(AuthError::from(parse_err));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.client_message(), "Invalid email address");
    }
}
