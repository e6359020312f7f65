//! HTTP request handlers for Training Gateway.

pub mod auth;
pub mod health;
pub mod metrics;
pub mod profile;

pub use auth::{login, reissue};
pub use health::health_check;
pub use metrics::metrics_handler;
pub use profile::get_profile;
