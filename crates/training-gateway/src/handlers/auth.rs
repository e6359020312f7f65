//! Token issuance handlers: login and reissue.
//!
//! Both routes are on the gate's bypass list - they are how a client obtains
//! the credential every other route requires.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use secrecy::ExposeSecret;
use std::sync::Arc;
use tracing::instrument;

use crate::errors::ApiError;
use crate::models::{LoginRequest, ReissueRequest, TokenPair};
use crate::observability::metrics::record_token_issued;
use crate::routes::AppState;

/// A real bcrypt hash that matches no password, verified when the username
/// is unknown so that lookup misses cost the same as hash mismatches.
const DUMMY_BCRYPT_HASH: &str = "$2b$12$LQv3c1yqBWVHxkd0LHAkCOYz6TtxMQJqhN8/LewY5GyYqExt7YD3a";

/// Handler for POST /login
///
/// Verifies the password against the provisioned user directory and returns
/// a fresh access/refresh pair.
///
/// ## Response
///
/// - 200 OK with a [`TokenPair`] on success
/// - 400 `BAD_REQUEST` for a malformed body
/// - 401 `INVALID_CREDENTIALS` for an unknown user or wrong password
///   (the two cases are indistinguishable to the caller)
#[instrument(skip_all, name = "tg.handlers.login")]
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenPair>, ApiError> {
    let Json(payload) = payload?;
    let record = state.users.lookup(&payload.username);

    // Always run bcrypt, against a dummy hash if the user is unknown,
    // to keep verification constant-time with respect to user existence.
    let hash_to_verify = record.map_or(DUMMY_BCRYPT_HASH, |r| r.password_hash.as_str());

    let password_matches = bcrypt::verify(payload.password.expose_secret(), hash_to_verify)
        .map_err(|e| {
            tracing::error!(target: "tg.handlers.login", error = %e, "bcrypt verification failed");
            ApiError::Internal
        })?;

    let Some(record) = record else {
        return Err(ApiError::InvalidCredentials);
    };

    if !password_matches {
        tracing::debug!(target: "tg.handlers.login", "Password mismatch");
        return Err(ApiError::InvalidCredentials);
    }

    let pair = state.issuer.issue_pair(&record.username)?;
    record_token_issued("login");

    tracing::info!(target: "tg.handlers.login", "Issued token pair");
    Ok(Json(pair))
}

/// Handler for POST /user/public/reissue
///
/// Exchanges a valid refresh token for a fresh access/refresh pair.
///
/// ## Response
///
/// - 200 OK with a new [`TokenPair`]
/// - 400 `BAD_REQUEST` for a malformed body
/// - 401 `INVALID_TOKEN` when the refresh token is expired, tampered with,
///   or is actually an access token (all failures collapse to one code)
#[instrument(skip_all, name = "tg.handlers.reissue")]
pub async fn reissue(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ReissueRequest>, JsonRejection>,
) -> Result<Json<TokenPair>, ApiError> {
    let Json(payload) = payload?;
    let claims = state
        .validator
        .validate_refresh(&payload.refresh_token)
        .map_err(|e| {
            tracing::debug!(target: "tg.handlers.reissue", error = ?e, "Refresh token rejected");
            ApiError::InvalidToken("The refresh token is invalid or expired".to_string())
        })?;

    let pair = state.issuer.issue_pair(&claims.sub)?;
    record_token_issued("reissue");

    tracing::info!(target: "tg.handlers.reissue", "Reissued token pair");
    Ok(Json(pair))
}
