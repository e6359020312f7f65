//! Access/refresh token issuance.
//!
//! The issuer mints HS256 token pairs for `/login` and `/user/public/reissue`.
//! Tokens carry a fresh `jti` and a `token_type` discriminator so the gate
//! can refuse refresh tokens on protected routes.

use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::claims::{Claims, TokenType};
use crate::models::TokenPair;

/// Errors that can occur while signing tokens.
#[derive(Debug, Error)]
pub enum TokenIssueError {
    #[error("Failed to sign token: {0}")]
    Signing(String),
}

/// Mints access/refresh token pairs.
///
/// Shares the signing secret with [`crate::auth::JwtValidator`]; immutable
/// after construction and safely shared across request-handling tasks.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    issuer: String,
    access_ttl_seconds: i64,
    refresh_ttl_seconds: i64,
}

impl TokenIssuer {
    /// Create a new issuer.
    pub fn new(
        secret: &[u8],
        issuer: &str,
        access_ttl_seconds: i64,
        refresh_ttl_seconds: i64,
    ) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            issuer: issuer.to_string(),
            access_ttl_seconds,
            refresh_ttl_seconds,
        }
    }

    /// Issue a fresh access/refresh pair for the given subject.
    pub fn issue_pair(&self, sub: &str) -> Result<TokenPair, TokenIssueError> {
        let access_token = self.sign(sub, TokenType::Access, self.access_ttl_seconds)?;
        let refresh_token = self.sign(sub, TokenType::Refresh, self.refresh_ttl_seconds)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_ttl_seconds,
        })
    }

    fn sign(
        &self,
        sub: &str,
        token_type: TokenType,
        ttl_seconds: i64,
    ) -> Result<String, TokenIssueError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: sub.to_string(),
            exp: now + ttl_seconds,
            iat: now,
            iss: self.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
            token_type,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )
        .map_err(|e| TokenIssueError::Signing(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::auth::jwt::JwtValidator;

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";
    const ISSUER: &str = "training-gateway";

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(SECRET, ISSUER, 1800, 86400)
    }

    #[test]
    fn test_issued_access_token_validates() {
        let pair = issuer().issue_pair("user-42").expect("Pair should issue");

        let validator = JwtValidator::new(SECRET, ISSUER, 0);
        let claims = validator
            .validate_access(&pair.access_token)
            .expect("Issued access token should validate");

        assert_eq!(claims.sub, "user-42");
        assert_eq!(claims.iss, ISSUER);
        assert!(claims.is_access());
        assert_eq!(claims.exp - claims.iat, 1800);
    }

    #[test]
    fn test_issued_refresh_token_validates_as_refresh_only() {
        let pair = issuer().issue_pair("user-42").expect("Pair should issue");

        let validator = JwtValidator::new(SECRET, ISSUER, 0);
        assert!(validator.validate_refresh(&pair.refresh_token).is_ok());
        assert!(validator.validate_access(&pair.refresh_token).is_err());
    }

    #[test]
    fn test_pair_metadata() {
        let pair = issuer().issue_pair("user-42").expect("Pair should issue");

        assert_eq!(pair.token_type, "Bearer");
        assert_eq!(pair.expires_in, 1800);
        assert_ne!(pair.access_token, pair.refresh_token);
    }

    #[test]
    fn test_jti_is_unique_per_token() {
        let validator = JwtValidator::new(SECRET, ISSUER, 0);
        let a = issuer().issue_pair("user-42").unwrap();
        let b = issuer().issue_pair("user-42").unwrap();

        let jti_a = validator.validate_access(&a.access_token).unwrap().jti;
        let jti_b = validator.validate_access(&b.access_token).unwrap().jti;
        assert_ne!(jti_a, jti_b);
    }
}
