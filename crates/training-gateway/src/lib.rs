//! Training Gateway Service Library
//!
//! This library provides the core functionality for the speech-training
//! platform's API gateway - a stateless HTTP service responsible for:
//!
//! - Request authentication (bearer token validation on every route)
//! - Public-endpoint bypass for `/login` and `/user/public/reissue`
//! - Access/refresh token issuance and reissue
//! - Structured error responses for credential failures
//!
//! # Architecture
//!
//! Every inbound request passes through the authentication gate exactly once:
//!
//! ```text
//! routes/mod.rs -> middleware/auth.rs -> handlers/*.rs
//! ```
//!
//! The gate attaches validated [`auth::Claims`] to request extensions; whether
//! an anonymous request is acceptable is decided by the individual handler,
//! not by the gate.
//!
//! # Modules
//!
//! - `auth` - JWT claims, validation, and issuance
//! - `config` - Service configuration from environment
//! - `errors` - Error types with HTTP status code mapping
//! - `handlers` - HTTP request handlers
//! - `middleware` - The request authentication gate
//! - `models` - Request/response DTOs and the user directory
//! - `observability` - Metrics recording
//! - `routes` - Axum router setup

pub mod auth;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod routes;
