//! HTTP routes for Training Gateway.
//!
//! Defines the Axum router and application state. Every route - including
//! the public ones - sits behind the authentication gate; the gate's
//! bypass list, not router partitioning, decides which paths skip
//! credential checks. That keeps the exemption surface in one place.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::auth::{JwtValidator, TokenIssuer};
use crate::config::Config;
use crate::errors::ApiError;
use crate::handlers;
use crate::middleware::auth::{authenticate, AuthGate};
use crate::models::UserDirectory;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration.
    pub config: Config,

    /// Provisioned users for `/login`.
    pub users: UserDirectory,

    /// Token validator shared with the gate.
    pub validator: Arc<JwtValidator>,

    /// Token issuer for `/login` and `/user/public/reissue`.
    pub issuer: Arc<TokenIssuer>,

    /// Render handle for the `/metrics` endpoint.
    pub metrics_handle: PrometheusHandle,
}

impl AppState {
    /// Build the application state from configuration.
    pub fn new(config: Config, metrics_handle: PrometheusHandle) -> Self {
        let validator = Arc::new(JwtValidator::new(
            config.jwt_secret_bytes(),
            &config.jwt_issuer,
            config.jwt_clock_skew_seconds,
        ));

        let issuer = Arc::new(TokenIssuer::new(
            config.jwt_secret_bytes(),
            &config.jwt_issuer,
            config.access_token_ttl_seconds,
            config.refresh_token_ttl_seconds,
        ));

        let users = UserDirectory::from_entries(
            config
                .users
                .iter()
                .map(|u| (u.username.as_str(), u.password_hash.as_str())),
        );

        Self {
            config,
            users,
            validator,
            issuer,
            metrics_handle,
        }
    }
}

/// Build the application routes.
///
/// Creates an Axum router with:
/// - `POST /login` - token issuance (bypassed by the gate)
/// - `POST /user/public/reissue` - token reissue (bypassed by the gate)
/// - `GET /user/profile` - authenticated identity echo
/// - `GET /health` - liveness probe
/// - `GET /metrics` - Prometheus scrape endpoint
/// - A fallback returning 404 `NOT_FOUND` in the gateway's error shape
/// - The authentication gate on every route, the fallback included
/// - TraceLayer for request logging
/// - 30 second request timeout
pub fn build_routes(state: Arc<AppState>) -> Router {
    let gate = AuthGate::new(
        state.validator.clone(),
        state.config.bypass_paths.iter().cloned(),
    );

    // Layer order (bottom-to-top execution):
    // 1. The authentication gate (innermost)
    // 2. TraceLayer - Log request details
    // 3. TimeoutLayer - Timeout the request
    Router::new()
        .route("/login", post(handlers::login))
        .route("/user/public/reissue", post(handlers::reissue))
        .route("/user/profile", get(handlers::get_profile))
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_handler))
        .fallback(not_found)
        .with_state(state)
        .layer(middleware::from_fn_with_state(gate, authenticate))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
}

/// Fallback for requests that match no route.
async fn not_found() -> ApiError {
    ApiError::NotFound("The requested resource was not found".to_string())
}
