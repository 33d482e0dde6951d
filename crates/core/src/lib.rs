//! Expense Tracker Core - shared domain types.
//!
//! This crate provides the validated types shared by the expense tracker
//! services. It contains only types and traits - no I/O, no database access,
//! no HTTP clients - which keeps it lightweight and usable anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and email addresses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
