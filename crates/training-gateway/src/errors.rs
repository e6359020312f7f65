//! Training Gateway error types.
//!
//! All errors map to appropriate HTTP status codes via the `IntoResponse` impl.
//! Error messages returned to clients are intentionally generic to avoid
//! leaking internal details. Actual errors are logged server-side.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::auth::jwt::JwtValidationError;
use crate::auth::tokens::TokenIssueError;

/// Training Gateway error type.
///
/// Maps to appropriate HTTP status codes:
/// - ExpiredToken, InvalidToken, InvalidCredentials, Unauthorized: 401
/// - BadRequest: 400 Bad Request
/// - NotFound: 404 Not Found
/// - Internal: 500 Internal Server Error
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Access token expired")]
    ExpiredToken,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Authentication required")]
    Unauthorized,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error")]
    Internal,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::ExpiredToken => (
                StatusCode::UNAUTHORIZED,
                "ACCESS_TOKEN_EXPIRED",
                "The access token has expired".to_string(),
            ),
            ApiError::InvalidToken(reason) => {
                (StatusCode::UNAUTHORIZED, "INVALID_TOKEN", reason.clone())
            }
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                "Invalid username or password".to_string(),
            ),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            ApiError::BadRequest(reason) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", reason.clone())
            }
            ApiError::NotFound(resource) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", resource.clone())
            }
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            ),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        let mut response = (status, Json(error_response)).into_response();

        // Add WWW-Authenticate header for 401 responses
        if status == StatusCode::UNAUTHORIZED {
            if let Ok(header_value) =
                "Bearer realm=\"training-api\", error=\"invalid_token\"".parse()
            {
                response
                    .headers_mut()
                    .insert("WWW-Authenticate", header_value);
            }
        }

        response
    }
}

/// Convert token validation failures into the gate's two error kinds.
///
/// An expired token gets its own response code; every other failure
/// collapses into a generic invalid-token response.
impl From<JwtValidationError> for ApiError {
    fn from(err: JwtValidationError) -> Self {
        match err {
            JwtValidationError::Expired => ApiError::ExpiredToken,
            JwtValidationError::TokenTooLarge
            | JwtValidationError::WrongTokenType
            | JwtValidationError::Invalid => {
                ApiError::InvalidToken("The access token is invalid".to_string())
            }
        }
    }
}

impl From<TokenIssueError> for ApiError {
    fn from(err: TokenIssueError) -> Self {
        tracing::error!(target: "tg.auth.tokens", error = %err, "Token signing failed");
        ApiError::Internal
    }
}

/// Convert body extraction failures into the gateway's error shape.
///
/// The rejection detail stays in logs; clients get a generic message.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(target: "tg.errors", error = %rejection, "Request body rejected");
        ApiError::BadRequest("The request body is invalid".to_string())
    }
}
