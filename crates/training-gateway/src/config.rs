//! Training Gateway configuration.
//!
//! Configuration is loaded from environment variables. All sensitive
//! fields are redacted in Debug output.

use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;
use std::env;
use std::fmt;
use thiserror::Error;

/// Default server bind address.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Default JWT issuer claim.
pub const DEFAULT_JWT_ISSUER: &str = "training-gateway";

/// Default JWT clock skew tolerance in seconds.
pub const DEFAULT_CLOCK_SKEW_SECONDS: u64 = 60;

/// Maximum allowed JWT clock skew tolerance in seconds.
///
/// Prevents misconfiguration that could weaken expiry enforcement by
/// allowing excessively large clock skew tolerance.
pub const MAX_CLOCK_SKEW_SECONDS: u64 = 600;

/// Default access token lifetime (30 minutes).
pub const DEFAULT_ACCESS_TOKEN_TTL_SECONDS: i64 = 1800;

/// Default refresh token lifetime (14 days).
pub const DEFAULT_REFRESH_TOKEN_TTL_SECONDS: i64 = 1_209_600;

/// Maximum accepted token lifetime (365 days).
///
/// Bounding the TTL keeps `exp` arithmetic far from the i64 range and
/// catches misconfiguration that would issue effectively eternal tokens.
pub const MAX_TOKEN_TTL_SECONDS: i64 = 31_536_000;

/// Minimum accepted JWT signing secret length in bytes.
pub const MIN_JWT_SECRET_BYTES: usize = 32;

/// Default authentication bypass paths (exact match, no wildcards).
pub const DEFAULT_BYPASS_PATHS: [&str; 2] = ["/login", "/user/public/reissue"];

/// A provisioned user the gateway can authenticate at `/login`.
///
/// The password hash is a bcrypt hash and is redacted in Debug output.
#[derive(Clone)]
pub struct UserEntry {
    /// Login name (the token subject on success).
    pub username: String,

    /// bcrypt hash of the user's password.
    pub password_hash: String,
}

impl fmt::Debug for UserEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserEntry")
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

/// Training Gateway configuration.
///
/// Loaded from environment variables with sensible defaults.
/// The JWT secret is redacted in Debug output to prevent credential leakage.
#[derive(Clone)]
pub struct Config {
    /// Server bind address (default: "0.0.0.0:8080").
    pub bind_address: String,

    /// Shared HS256 secret for signing and validating tokens.
    pub jwt_secret: SecretString,

    /// Expected `iss` claim on every token.
    pub jwt_issuer: String,

    /// Clock skew tolerance in seconds applied to `exp` validation.
    pub jwt_clock_skew_seconds: u64,

    /// Access token lifetime in seconds.
    pub access_token_ttl_seconds: i64,

    /// Refresh token lifetime in seconds.
    pub refresh_token_ttl_seconds: i64,

    /// Paths exempt from authentication (exact string match).
    pub bypass_paths: Vec<String>,

    /// Users the gateway can authenticate at `/login`.
    pub users: Vec<UserEntry>,
}

/// Custom Debug implementation that redacts sensitive fields.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bind_address", &self.bind_address)
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_issuer", &self.jwt_issuer)
            .field("jwt_clock_skew_seconds", &self.jwt_clock_skew_seconds)
            .field("access_token_ttl_seconds", &self.access_token_ttl_seconds)
            .field("refresh_token_ttl_seconds", &self.refresh_token_ttl_seconds)
            .field("bypass_paths", &self.bypass_paths)
            .field("users", &self.users)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid JWT secret: {0}")]
    InvalidJwtSecret(String),

    #[error("Invalid JWT clock skew configuration: {0}")]
    InvalidJwtClockSkew(String),

    #[error("Invalid token TTL configuration: {0}")]
    InvalidTokenTtl(String),

    #[error("Invalid user entry: {0}")]
    InvalidUserEntry(String),
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let jwt_secret = vars
            .get("TG_JWT_SECRET")
            .ok_or_else(|| ConfigError::MissingEnvVar("TG_JWT_SECRET".to_string()))?
            .clone();

        if jwt_secret.len() < MIN_JWT_SECRET_BYTES {
            return Err(ConfigError::InvalidJwtSecret(format!(
                "TG_JWT_SECRET must be at least {} bytes, got {}",
                MIN_JWT_SECRET_BYTES,
                jwt_secret.len()
            )));
        }
        let jwt_secret = SecretString::from(jwt_secret);

        let jwt_issuer = vars
            .get("TG_JWT_ISSUER")
            .cloned()
            .unwrap_or_else(|| DEFAULT_JWT_ISSUER.to_string());

        // Parse JWT clock skew tolerance with validation
        let jwt_clock_skew_seconds = if let Some(value_str) = vars.get("JWT_CLOCK_SKEW_SECONDS") {
            let value: u64 = value_str.parse().map_err(|e| {
                ConfigError::InvalidJwtClockSkew(format!(
                    "JWT_CLOCK_SKEW_SECONDS must be a valid non-negative integer, got '{}': {}",
                    value_str, e
                ))
            })?;

            if value > MAX_CLOCK_SKEW_SECONDS {
                return Err(ConfigError::InvalidJwtClockSkew(format!(
                    "JWT_CLOCK_SKEW_SECONDS must not exceed {} seconds, got {}",
                    MAX_CLOCK_SKEW_SECONDS, value
                )));
            }

            value
        } else {
            DEFAULT_CLOCK_SKEW_SECONDS
        };

        let access_token_ttl_seconds = parse_ttl(
            vars,
            "ACCESS_TOKEN_TTL_SECONDS",
            DEFAULT_ACCESS_TOKEN_TTL_SECONDS,
        )?;

        let refresh_token_ttl_seconds = parse_ttl(
            vars,
            "REFRESH_TOKEN_TTL_SECONDS",
            DEFAULT_REFRESH_TOKEN_TTL_SECONDS,
        )?;

        // Parse bypass paths (comma-separated, exact-match entries)
        let bypass_paths = match vars.get("TG_BYPASS_PATHS") {
            Some(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => DEFAULT_BYPASS_PATHS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        };

        // Parse provisioned users ("username:bcrypt-hash" entries, comma-separated)
        let users = match vars.get("TG_USERS") {
            Some(raw) => parse_users(raw)?,
            None => Vec::new(),
        };

        Ok(Config {
            bind_address,
            jwt_secret,
            jwt_issuer,
            jwt_clock_skew_seconds,
            access_token_ttl_seconds,
            refresh_token_ttl_seconds,
            bypass_paths,
            users,
        })
    }

    /// The JWT secret as raw bytes, for key construction.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.expose_secret().as_bytes()
    }
}

fn parse_ttl(
    vars: &HashMap<String, String>,
    key: &str,
    default: i64,
) -> Result<i64, ConfigError> {
    let Some(value_str) = vars.get(key) else {
        return Ok(default);
    };

    let value: i64 = value_str.parse().map_err(|e| {
        ConfigError::InvalidTokenTtl(format!(
            "{} must be a valid positive integer, got '{}': {}",
            key, value_str, e
        ))
    })?;

    if value <= 0 {
        return Err(ConfigError::InvalidTokenTtl(format!(
            "{} must be greater than 0, got {}",
            key, value
        )));
    }

    if value > MAX_TOKEN_TTL_SECONDS {
        return Err(ConfigError::InvalidTokenTtl(format!(
            "{} must not exceed {} seconds, got {}",
            key, MAX_TOKEN_TTL_SECONDS, value
        )));
    }

    Ok(value)
}

/// Parse the `TG_USERS` value: comma-separated `username:bcrypt-hash` pairs.
///
/// bcrypt hashes contain `$` but never `:` or `,`, so the simple split is safe.
fn parse_users(raw: &str) -> Result<Vec<UserEntry>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|entry| {
            let (username, password_hash) = entry.split_once(':').ok_or_else(|| {
                ConfigError::InvalidUserEntry(format!(
                    "expected 'username:bcrypt-hash', got '{}'",
                    entry
                ))
            })?;

            if username.is_empty() || password_hash.is_empty() {
                return Err(ConfigError::InvalidUserEntry(format!(
                    "empty username or hash in '{}'",
                    entry
                )));
            }

            Ok(UserEntry {
                username: username.to_string(),
                password_hash: password_hash.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn base_vars() -> HashMap<String, String> {
        HashMap::from([(
            "TG_JWT_SECRET".to_string(),
            "0123456789abcdef0123456789abcdef".to_string(),
        )])
    }

    #[test]
    fn test_from_vars_success_with_defaults() {
        let vars = base_vars();

        let config = Config::from_vars(&vars).expect("Config should load successfully");

        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(config.jwt_issuer, DEFAULT_JWT_ISSUER);
        assert_eq!(config.jwt_clock_skew_seconds, DEFAULT_CLOCK_SKEW_SECONDS);
        assert_eq!(
            config.access_token_ttl_seconds,
            DEFAULT_ACCESS_TOKEN_TTL_SECONDS
        );
        assert_eq!(
            config.refresh_token_ttl_seconds,
            DEFAULT_REFRESH_TOKEN_TTL_SECONDS
        );
        assert_eq!(config.bypass_paths, vec!["/login", "/user/public/reissue"]);
        assert!(config.users.is_empty());
    }

    #[test]
    fn test_from_vars_success_with_custom_values() {
        let mut vars = base_vars();
        vars.insert("BIND_ADDRESS".to_string(), "127.0.0.1:9000".to_string());
        vars.insert("TG_JWT_ISSUER".to_string(), "speech-platform".to_string());
        vars.insert("JWT_CLOCK_SKEW_SECONDS".to_string(), "120".to_string());
        vars.insert("ACCESS_TOKEN_TTL_SECONDS".to_string(), "600".to_string());
        vars.insert("REFRESH_TOKEN_TTL_SECONDS".to_string(), "86400".to_string());
        vars.insert(
            "TG_BYPASS_PATHS".to_string(),
            "/login, /signup".to_string(),
        );

        let config = Config::from_vars(&vars).expect("Config should load successfully");

        assert_eq!(config.bind_address, "127.0.0.1:9000");
        assert_eq!(config.jwt_issuer, "speech-platform");
        assert_eq!(config.jwt_clock_skew_seconds, 120);
        assert_eq!(config.access_token_ttl_seconds, 600);
        assert_eq!(config.refresh_token_ttl_seconds, 86400);
        assert_eq!(config.bypass_paths, vec!["/login", "/signup"]);
    }

    #[test]
    fn test_from_vars_missing_jwt_secret() {
        let vars = HashMap::new();

        let result = Config::from_vars(&vars);
        assert!(matches!(result, Err(ConfigError::MissingEnvVar(v)) if v == "TG_JWT_SECRET"));
    }

    #[test]
    fn test_from_vars_rejects_short_secret() {
        let vars = HashMap::from([("TG_JWT_SECRET".to_string(), "too-short".to_string())]);

        let result = Config::from_vars(&vars);
        assert!(
            matches!(result, Err(ConfigError::InvalidJwtSecret(msg)) if msg.contains("at least"))
        );
    }

    #[test]
    fn test_clock_skew_rejects_excessive_value() {
        let mut vars = base_vars();
        vars.insert("JWT_CLOCK_SKEW_SECONDS".to_string(), "601".to_string());

        let result = Config::from_vars(&vars);
        assert!(
            matches!(result, Err(ConfigError::InvalidJwtClockSkew(msg)) if msg.contains("must not exceed"))
        );
    }

    #[test]
    fn test_clock_skew_rejects_non_numeric() {
        let mut vars = base_vars();
        vars.insert("JWT_CLOCK_SKEW_SECONDS".to_string(), "sixty".to_string());

        let result = Config::from_vars(&vars);
        assert!(matches!(result, Err(ConfigError::InvalidJwtClockSkew(_))));
    }

    #[test]
    fn test_ttl_rejects_zero() {
        let mut vars = base_vars();
        vars.insert("ACCESS_TOKEN_TTL_SECONDS".to_string(), "0".to_string());

        let result = Config::from_vars(&vars);
        assert!(
            matches!(result, Err(ConfigError::InvalidTokenTtl(msg)) if msg.contains("greater than 0"))
        );
    }

    #[test]
    fn test_ttl_rejects_excessive_value() {
        let mut vars = base_vars();
        vars.insert(
            "REFRESH_TOKEN_TTL_SECONDS".to_string(),
            (MAX_TOKEN_TTL_SECONDS + 1).to_string(),
        );

        let result = Config::from_vars(&vars);
        assert!(
            matches!(result, Err(ConfigError::InvalidTokenTtl(msg)) if msg.contains("must not exceed"))
        );
    }

    #[test]
    fn test_parse_users_valid_entries() {
        let mut vars = base_vars();
        vars.insert(
            "TG_USERS".to_string(),
            "alice:$2b$12$abcdefghijk,bob:$2b$12$lmnopqrstuv".to_string(),
        );

        let config = Config::from_vars(&vars).expect("Config should load successfully");
        assert_eq!(config.users.len(), 2);
        assert_eq!(config.users[0].username, "alice");
        assert_eq!(config.users[0].password_hash, "$2b$12$abcdefghijk");
        assert_eq!(config.users[1].username, "bob");
    }

    #[test]
    fn test_parse_users_rejects_malformed_entry() {
        let mut vars = base_vars();
        vars.insert("TG_USERS".to_string(), "alice-no-separator".to_string());

        let result = Config::from_vars(&vars);
        assert!(matches!(result, Err(ConfigError::InvalidUserEntry(_))));
    }

    #[test]
    fn test_debug_redacts_jwt_secret() {
        let config = Config::from_vars(&base_vars()).expect("Config should load successfully");
        let debug_str = format!("{:?}", config);

        assert!(
            !debug_str.contains("0123456789abcdef"),
            "Debug output should not contain the JWT secret"
        );
        assert!(debug_str.contains("[REDACTED]"));
    }

    #[test]
    fn test_debug_redacts_user_hashes() {
        let mut vars = base_vars();
        vars.insert(
            "TG_USERS".to_string(),
            "alice:$2b$12$secret-hash-value".to_string(),
        );

        let config = Config::from_vars(&vars).expect("Config should load successfully");
        let debug_str = format!("{:?}", config);

        assert!(!debug_str.contains("secret-hash-value"));
        assert!(debug_str.contains("alice"));
    }
}
