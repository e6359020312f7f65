//! Builder patterns for test token construction
//!
//! Provides a fluent API for creating test JWTs, including deliberately
//! broken ones (expired, wrong issuer, wrong type, wrong secret).

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::json;
use uuid::Uuid;

/// Builder for creating test JWTs
///
/// # Example
/// ```rust,ignore
/// let token = TestTokenBuilder::new()
///     .for_user("alice")
///     .expires_in(-7200) // already expired
///     .sign(TEST_JWT_SECRET);
/// ```
pub struct TestTokenBuilder {
    sub: String,
    iss: String,
    token_type: String,
    exp: i64,
    iat: i64,
}

impl TestTokenBuilder {
    /// Create a new token builder with defaults matching the test harness.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            sub: "test-subject".to_string(),
            iss: "training-gateway".to_string(),
            token_type: "access".to_string(),
            exp: (now + Duration::seconds(3600)).timestamp(),
            iat: now.timestamp(),
        }
    }

    /// Set the subject (user).
    pub fn for_user(mut self, subject: &str) -> Self {
        self.sub = subject.to_string();
        self
    }

    /// Set the issuer claim.
    pub fn with_issuer(mut self, issuer: &str) -> Self {
        self.iss = issuer.to_string();
        self
    }

    /// Set the `token_type` claim. Any string is accepted so tests can
    /// craft tokens the gateway should refuse.
    pub fn with_token_type(mut self, token_type: &str) -> Self {
        self.token_type = token_type.to_string();
        self
    }

    /// Mark this as a refresh token.
    pub fn refresh(self) -> Self {
        self.with_token_type("refresh")
    }

    /// Set expiration in seconds from now (negative for an expired token).
    pub fn expires_in(mut self, seconds: i64) -> Self {
        self.exp = (Utc::now() + Duration::seconds(seconds)).timestamp();
        self
    }

    /// Set issued-at timestamp.
    pub fn issued_at(mut self, timestamp: i64) -> Self {
        self.iat = timestamp;
        self
    }

    /// Build the claims as a JSON value.
    pub fn build(self) -> serde_json::Value {
        json!({
            "sub": self.sub,
            "iss": self.iss,
            "token_type": self.token_type,
            "exp": self.exp,
            "iat": self.iat,
            "jti": Uuid::new_v4().to_string(),
        })
    }

    /// Sign the claims with the given HS256 secret.
    pub fn sign(self, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            &self.build(),
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("Failed to sign test token")
    }
}

impl Default for TestTokenBuilder {
    fn default() -> Self {
        Self::new()
    }
}
