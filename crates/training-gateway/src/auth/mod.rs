//! Authentication primitives for Training Gateway.
//!
//! # Components
//!
//! - `claims` - JWT claims structure with Debug redaction
//! - `jwt` - Token validation with expired/invalid classification
//! - `tokens` - Access/refresh token issuance

pub mod claims;
pub mod jwt;
pub mod tokens;

pub use claims::{Claims, TokenType};
pub use jwt::JwtValidator;
pub use tokens::TokenIssuer;
