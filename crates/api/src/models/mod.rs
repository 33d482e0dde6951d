//! Domain model types.

pub mod user;

pub use user::User;
