//! Middleware for Training Gateway.
//!
//! # Components
//!
//! - `auth` - The request authentication gate applied to every route

pub mod auth;

pub use auth::{authenticate, AuthGate};
