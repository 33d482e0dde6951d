//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                 - Greeting
//! GET  /health           - Liveness check
//! GET  /health/ready     - Readiness check (verifies store connectivity)
//!
//! # Auth
//! POST /api/register     - Register a new account
//! POST /api/login        - Authenticate an existing account
//! ```
//!
//! Health routes are registered in `main` next to the listener; everything
//! else lives here.

pub mod auth;
pub mod home;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Assemble the application routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/api/register", post(auth::register))
        .route("/api/login", post(auth::login))
}
