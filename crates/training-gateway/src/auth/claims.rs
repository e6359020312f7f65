//! JWT claims structure.
//!
//! Contains the claims extracted from validated tokens. The `sub` field is
//! redacted in Debug output to prevent exposure in logs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a token grants API access or only the right to reissue a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT Claims structure for validated tokens.
///
/// The `sub` field contains user identifiers which should not be exposed
/// in logs. A custom Debug implementation redacts this field.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user identifier) - redacted in Debug output.
    pub sub: String,

    /// Expiration timestamp (Unix epoch seconds).
    pub exp: i64,

    /// Issued-at timestamp (Unix epoch seconds).
    pub iat: i64,

    /// Issuer of the token.
    pub iss: String,

    /// Unique token identifier.
    pub jti: String,

    /// Token kind: `access` or `refresh`.
    pub token_type: TokenType,
}

/// Custom Debug implementation that redacts the `sub` field.
impl fmt::Debug for Claims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Claims")
            .field("sub", &"[REDACTED]")
            .field("exp", &self.exp)
            .field("iat", &self.iat)
            .field("iss", &self.iss)
            .field("jti", &self.jti)
            .field("token_type", &self.token_type)
            .finish()
    }
}

impl Claims {
    /// Whether this token can be presented as an access credential.
    pub fn is_access(&self) -> bool {
        self.token_type == TokenType::Access
    }

    /// Whether this token can be exchanged for a new pair at reissue.
    pub fn is_refresh(&self) -> bool {
        self.token_type == TokenType::Refresh
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn sample_claims(token_type: TokenType) -> Claims {
        Claims {
            sub: "secret-user-id".to_string(),
            exp: 1234567890,
            iat: 1234567800,
            iss: "training-gateway".to_string(),
            jti: "a8f5f167-0b25-4b21-9f3a-000000000000".to_string(),
            token_type,
        }
    }

    #[test]
    fn test_claims_debug_redacts_sub() {
        let claims = sample_claims(TokenType::Access);
        let debug_str = format!("{:?}", claims);

        assert!(
            !debug_str.contains("secret-user-id"),
            "Debug output should not contain actual sub value"
        );
        assert!(
            debug_str.contains("[REDACTED]"),
            "Debug output should contain [REDACTED]"
        );
    }

    #[test]
    fn test_token_type_predicates() {
        assert!(sample_claims(TokenType::Access).is_access());
        assert!(!sample_claims(TokenType::Access).is_refresh());
        assert!(sample_claims(TokenType::Refresh).is_refresh());
        assert!(!sample_claims(TokenType::Refresh).is_access());
    }

    #[test]
    fn test_token_type_serializes_lowercase() {
        let json = serde_json::to_string(&sample_claims(TokenType::Access)).unwrap();
        assert!(json.contains("\"token_type\":\"access\""));

        let json = serde_json::to_string(&sample_claims(TokenType::Refresh)).unwrap();
        assert!(json.contains("\"token_type\":\"refresh\""));
    }

    #[test]
    fn test_claims_round_trip() {
        let claims = sample_claims(TokenType::Refresh);
        let json = serde_json::to_string(&claims).unwrap();
        let deserialized: Claims = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.sub, claims.sub);
        assert_eq!(deserialized.exp, claims.exp);
        assert_eq!(deserialized.iat, claims.iat);
        assert_eq!(deserialized.iss, claims.iss);
        assert_eq!(deserialized.jti, claims.jti);
        assert_eq!(deserialized.token_type, claims.token_type);
    }
}
