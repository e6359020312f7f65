//! # Training Gateway Test Utilities
//!
//! Shared test utilities for the Training Gateway service.
//!
//! This crate provides:
//! - Token builders for crafting valid, expired, and malformed JWTs
//! - A router harness for driving the full application in-process
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tg_test_utils::*;
//! use tower::util::ServiceExt;
//!
//! #[tokio::test]
//! async fn test_example() -> anyhow::Result<()> {
//!     let app = harness::test_router();
//!     let token = TestTokenBuilder::new().for_user("alice").sign(harness::TEST_JWT_SECRET);
//!
//!     let response = app
//!         .oneshot(harness::get_with_bearer("/user/profile", &token))
//!         .await?;
//!
//!     assert_eq!(response.status(), 200);
//!     Ok(())
//! }
//! ```

pub mod harness;
pub mod token_builders;

// Re-export commonly used items
pub use token_builders::TestTokenBuilder;
