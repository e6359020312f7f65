//! Request/response DTOs and the in-memory user directory.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Request body for `POST /login`.
///
/// The password is a `SecretString`, so deriving Debug is safe - the value
/// is redacted automatically.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: SecretString,
}

/// Request body for `POST /user/public/reissue`.
#[derive(Debug, Deserialize)]
pub struct ReissueRequest {
    pub refresh_token: String,
}

/// Token pair returned by `/login` and `/user/public/reissue`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Always `"Bearer"`.
    pub token_type: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

/// Response for `GET /user/profile`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user_id: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

/// Response for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// A provisioned user record.
#[derive(Clone)]
pub struct UserRecord {
    pub username: String,
    pub password_hash: String,
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

/// In-memory directory of users the gateway can authenticate.
///
/// Built once at startup from configuration; read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: HashMap<String, UserRecord>,
}

impl UserDirectory {
    /// Build a directory from `(username, bcrypt-hash)` entries.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let users = entries
            .into_iter()
            .map(|(username, password_hash)| {
                (
                    username.to_string(),
                    UserRecord {
                        username: username.to_string(),
                        password_hash: password_hash.to_string(),
                    },
                )
            })
            .collect();

        Self { users }
    }

    /// Look up a user by login name.
    pub fn lookup(&self, username: &str) -> Option<&UserRecord> {
        self.users.get(username)
    }
}
