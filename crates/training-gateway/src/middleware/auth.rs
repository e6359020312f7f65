//! The request authentication gate.
//!
//! Every inbound request passes through [`authenticate`] exactly once. The
//! gate decides one of four outcomes per request:
//!
//! - **bypass**: the path is on the exact-match bypass list; the request
//!   continues untouched and the `Authorization` header is never inspected
//! - **anonymous**: no bearer credential was supplied; the request continues
//!   with no identity attached (downstream handlers decide whether that is
//!   acceptable)
//! - **authenticated**: the credential validated; [`Claims`] are attached to
//!   request extensions for the remainder of this request
//! - **rejected**: validation failed; a structured 401 is written and the
//!   inner handler never runs
//!
//! Identity is carried in the request's own extension map rather than any
//! task-local or global slot, so nothing can leak across concurrent requests.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::instrument;

use crate::auth::jwt::{JwtValidationError, JwtValidator};
use crate::errors::ApiError;
use crate::observability::metrics::record_gate_outcome;

/// Shared state for the authentication gate.
///
/// Immutable after construction: the bypass list and validator are built
/// once at startup and shared read-only across all request-handling tasks.
#[derive(Clone)]
pub struct AuthGate {
    validator: Arc<JwtValidator>,
    bypass_paths: Arc<HashSet<String>>,
}

impl AuthGate {
    /// Create a gate from a validator and a set of exempt paths.
    pub fn new(validator: Arc<JwtValidator>, bypass_paths: impl IntoIterator<Item = String>) -> Self {
        Self {
            validator,
            bypass_paths: Arc::new(bypass_paths.into_iter().collect()),
        }
    }

    /// True iff `path` exactly matches a bypass entry.
    ///
    /// No wildcard or prefix matching: `/login/extra` is NOT bypassed.
    pub fn should_bypass(&self, path: &str) -> bool {
        self.bypass_paths.contains(path)
    }
}

/// Extract the bearer credential from the `Authorization` header.
///
/// Returns the substring after the exact, case-sensitive prefix `"Bearer "`,
/// trimmed of surrounding whitespace. A missing header, a non-UTF-8 value,
/// another scheme, or an empty remainder all yield `None` - the absence of
/// a credential, never an error.
pub fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// The per-request entry point of the authentication gate.
///
/// # Response
///
/// - Bypassed or anonymous requests continue down the chain untouched
/// - Valid credentials attach [`crate::auth::Claims`] to request extensions
/// - An expired credential returns 401 `ACCESS_TOKEN_EXPIRED`
/// - Any other invalid credential returns 401 `INVALID_TOKEN`
///
/// The inner handler runs at most once, and never after a rejection.
#[instrument(skip_all, name = "tg.middleware.auth")]
pub async fn authenticate(
    State(gate): State<AuthGate>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if gate.should_bypass(req.uri().path()) {
        record_gate_outcome("bypass");
        return Ok(next.run(req).await);
    }

    let Some(token) = extract_bearer(req.headers()) else {
        // Anonymous continuation: authorization is a downstream concern
        record_gate_outcome("anonymous");
        return Ok(next.run(req).await);
    };

    match gate.validator.validate_access(token) {
        Ok(claims) => {
            record_gate_outcome("authenticated");
            req.extensions_mut().insert(claims);
            Ok(next.run(req).await)
        }
        Err(err @ JwtValidationError::Expired) => {
            tracing::debug!(target: "tg.middleware.auth", "Expired access token rejected");
            record_gate_outcome("expired");
            Err(err.into())
        }
        Err(err) => {
            tracing::debug!(target: "tg.middleware.auth", error = ?err, "Invalid access token rejected");
            record_gate_outcome("invalid");
            Err(err.into())
        }
    }
}
