//! JWT validation for Training Gateway.
//!
//! Validates bearer tokens against the gateway's shared HS256 secret and
//! classifies every failure as either "expired" or "invalid" - the only two
//! error kinds the authentication gate surfaces to clients.
//!
//! # Security
//!
//! - Tokens are size-checked BEFORE parsing (DoS prevention)
//! - Expiration is validated with a configurable clock skew tolerance
//! - The issuer claim is always checked
//! - Generic error messages prevent information leakage

use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use thiserror::Error;

use crate::auth::claims::{Claims, TokenType};

/// Maximum allowed JWT size in bytes (8KB).
///
/// Oversized tokens are rejected before any base64 decoding or signature
/// verification happens, bounding the work an attacker can force per request.
pub const MAX_JWT_SIZE_BYTES: usize = 8192;

/// Errors that can occur during token validation.
///
/// Note: Display messages are intentionally generic. Detailed failure
/// information is logged at debug level for troubleshooting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtValidationError {
    /// Token size exceeds [`MAX_JWT_SIZE_BYTES`].
    #[error("The access token is invalid")]
    TokenTooLarge,

    /// Token was well-formed and correctly signed but past expiry.
    #[error("The access token has expired")]
    Expired,

    /// A refresh token was presented where an access token was required,
    /// or vice versa.
    #[error("The access token is invalid")]
    WrongTokenType,

    /// Any other failure: malformed structure, bad signature, wrong issuer.
    #[error("The access token is invalid")]
    Invalid,
}

/// JWT validator over the gateway's shared signing secret.
///
/// Holds no mutable state; a single instance is shared read-only across
/// all request-handling tasks.
pub struct JwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtValidator {
    /// Create a new validator.
    ///
    /// # Arguments
    ///
    /// * `secret` - The shared HS256 signing secret
    /// * `issuer` - Expected `iss` claim value
    /// * `leeway_seconds` - Clock skew tolerance applied to expiry checks
    pub fn new(secret: &[u8], issuer: &str, leeway_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer]);
        validation.leeway = leeway_seconds;
        validation.validate_exp = true;

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Validate a token and return its claims, regardless of token type.
    ///
    /// # Errors
    ///
    /// - [`JwtValidationError::TokenTooLarge`] for oversized input
    /// - [`JwtValidationError::Expired`] when the token was correctly signed
    ///   but is past expiry (beyond the configured leeway)
    /// - [`JwtValidationError::Invalid`] for every other failure
    pub fn validate(&self, token: &str) -> Result<Claims, JwtValidationError> {
        if token.len() > MAX_JWT_SIZE_BYTES {
            tracing::debug!(target: "tg.auth.jwt", size = token.len(), "Rejected oversized token");
            return Err(JwtValidationError::TokenTooLarge);
        }

        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtValidationError::Expired,
                _ => {
                    tracing::debug!(target: "tg.auth.jwt", error = %e, "Token verification failed");
                    JwtValidationError::Invalid
                }
            })?;

        Ok(token_data.claims)
    }

    /// Validate a token presented as an access credential.
    ///
    /// Refresh tokens are rejected here; a refresh token is never a valid
    /// credential for protected routes.
    pub fn validate_access(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let claims = self.validate(token)?;
        if claims.token_type != TokenType::Access {
            tracing::debug!(target: "tg.auth.jwt", "Non-access token presented as access credential");
            return Err(JwtValidationError::WrongTokenType);
        }
        Ok(claims)
    }

    /// Validate a token presented at the reissue endpoint.
    pub fn validate_refresh(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let claims = self.validate(token)?;
        if claims.token_type != TokenType::Refresh {
            tracing::debug!(target: "tg.auth.jwt", "Non-refresh token presented at reissue");
            return Err(JwtValidationError::WrongTokenType);
        }
        Ok(claims)
    }
}
