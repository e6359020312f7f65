//! Authenticated user profile handler.
//!
//! Returns the identity the gate attached to the current request. Anonymous
//! requests reach this handler through the gate; the rejection happens here,
//! not in the middleware.

use axum::{Extension, Json};
use tracing::instrument;

use crate::auth::Claims;
use crate::errors::ApiError;
use crate::models::ProfileResponse;

/// Handler for GET /user/profile
///
/// ## Response
///
/// Returns 200 OK with the authenticated identity:
///
/// ```json
/// {
///   "user_id": "alice",
///   "issued_at": 1234567800,
///   "expires_at": 1234569600
/// }
/// ```
///
/// Anonymous requests (no credential supplied) receive 401 `UNAUTHORIZED`.
#[instrument(skip_all, name = "tg.handlers.profile")]
pub async fn get_profile(
    claims: Option<Extension<Claims>>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let Some(Extension(claims)) = claims else {
        tracing::debug!(target: "tg.handlers.profile", "Anonymous request rejected");
        return Err(ApiError::Unauthorized);
    };

    Ok(Json(ProfileResponse {
        user_id: claims.sub,
        issued_at: claims.iat,
        expires_at: claims.exp,
    }))
}
