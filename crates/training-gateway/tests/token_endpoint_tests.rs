//! Login and reissue endpoint integration tests.

// Test code is allowed to use expect/unwrap for assertions
#![allow(clippy::unwrap_used, clippy::expect_used)]

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;
use tower::util::ServiceExt;

use tg_test_utils::harness::{
    self, get_with_bearer, post_json, read_body_json, TEST_JWT_SECRET, TEST_PASSWORD,
    TEST_USERNAME,
};
use tg_test_utils::TestTokenBuilder;

#[tokio::test]
async fn test_login_issues_usable_token_pair() -> Result<()> {
    let app = harness::test_router();

    let response = app
        .clone()
        .oneshot(post_json(
            "/login",
            &json!({ "username": TEST_USERNAME, "password": TEST_PASSWORD }),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_body_json(response).await;
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], 1800);

    // The issued access token authenticates against the protected route
    let access = body["access_token"].as_str().unwrap();
    let response = app.oneshot(get_with_bearer("/user/profile", access)).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_body_json(response).await;
    assert_eq!(body["user_id"], TEST_USERNAME);
    Ok(())
}

#[tokio::test]
async fn test_login_wrong_password_rejected() -> Result<()> {
    let response = harness::test_router()
        .oneshot(post_json(
            "/login",
            &json!({ "username": TEST_USERNAME, "password": "nope" }),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = read_body_json(response).await;
    assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");
    Ok(())
}

#[tokio::test]
async fn test_login_unknown_user_indistinguishable_from_bad_password() -> Result<()> {
    let response = harness::test_router()
        .oneshot(post_json(
            "/login",
            &json!({ "username": "mallory", "password": TEST_PASSWORD }),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = read_body_json(response).await;
    assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");
    Ok(())
}

#[tokio::test]
async fn test_login_malformed_body_gets_structured_error() -> Result<()> {
    let response = harness::test_router()
        .oneshot(post_json("/login", &json!({ "username": TEST_USERNAME })))
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_body_json(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    Ok(())
}

#[tokio::test]
async fn test_reissue_malformed_body_gets_structured_error() -> Result<()> {
    let response = harness::test_router()
        .oneshot(post_json("/user/public/reissue", &json!({})))
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_body_json(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    Ok(())
}

#[tokio::test]
async fn test_reissue_accepts_refresh_token() -> Result<()> {
    let app = harness::test_router();
    let refresh = TestTokenBuilder::new()
        .for_user(TEST_USERNAME)
        .refresh()
        .sign(TEST_JWT_SECRET);

    let response = app
        .clone()
        .oneshot(post_json(
            "/user/public/reissue",
            &json!({ "refresh_token": refresh }),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_body_json(response).await;

    // The reissued pair carries the original subject
    let access = body["access_token"].as_str().unwrap();
    let response = app.oneshot(get_with_bearer("/user/profile", access)).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_body_json(response).await;
    assert_eq!(body["user_id"], TEST_USERNAME);
    Ok(())
}

#[tokio::test]
async fn test_reissue_rejects_access_token() -> Result<()> {
    let access = TestTokenBuilder::new()
        .for_user(TEST_USERNAME)
        .sign(TEST_JWT_SECRET);

    let response = harness::test_router()
        .oneshot(post_json(
            "/user/public/reissue",
            &json!({ "refresh_token": access }),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = read_body_json(response).await;
    assert_eq!(body["error"]["code"], "INVALID_TOKEN");
    Ok(())
}

#[tokio::test]
async fn test_reissue_rejects_expired_refresh_token() -> Result<()> {
    let refresh = TestTokenBuilder::new()
        .refresh()
        .expires_in(-7200)
        .sign(TEST_JWT_SECRET);

    let response = harness::test_router()
        .oneshot(post_json(
            "/user/public/reissue",
            &json!({ "refresh_token": refresh }),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = read_body_json(response).await;
    assert_eq!(body["error"]["code"], "INVALID_TOKEN");
    Ok(())
}

#[tokio::test]
async fn test_reissue_rejects_garbage_token() -> Result<()> {
    let response = harness::test_router()
        .oneshot(post_json(
            "/user/public/reissue",
            &json!({ "refresh_token": "not-a-jwt" }),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = read_body_json(response).await;
    assert_eq!(body["error"]["code"], "INVALID_TOKEN");
    Ok(())
}
