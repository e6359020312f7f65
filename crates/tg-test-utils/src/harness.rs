//! In-process router harness for integration tests
//!
//! Builds the full Training Gateway router - gate, handlers, layers - so
//! tests can drive it with `tower::util::ServiceExt::oneshot` without
//! binding a socket.

use axum::body::Body;
use axum::http::{Method, Request};
use axum::Router;
use http_body_util::BodyExt;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use training_gateway::config::Config;
use training_gateway::observability;
use training_gateway::routes::{self, AppState};

/// HS256 secret shared by the harness router and the token builders.
pub const TEST_JWT_SECRET: &str = "test-secret-0123456789abcdef0123456789abcdef";

/// The single provisioned user of the harness.
pub const TEST_USERNAME: &str = "alice";

/// The provisioned user's password.
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Global metrics handle shared by every router in the test binary.
///
/// A Prometheus recorder can only be installed once per process; later
/// routers fall back to a detached recorder handle.
static TEST_METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn test_metrics_handle() -> PrometheusHandle {
    TEST_METRICS_HANDLE
        .get_or_init(|| {
            observability::metrics::init_recorder()
                .unwrap_or_else(|_| PrometheusBuilder::new().build_recorder().handle())
        })
        .clone()
}

/// Build the harness configuration: default bypass list, zero clock skew,
/// one provisioned user.
pub fn test_config() -> Config {
    let password_hash =
        bcrypt::hash(TEST_PASSWORD, 4).expect("Failed to hash test password");

    let vars = HashMap::from([
        ("TG_JWT_SECRET".to_string(), TEST_JWT_SECRET.to_string()),
        ("JWT_CLOCK_SKEW_SECONDS".to_string(), "0".to_string()),
        (
            "TG_USERS".to_string(),
            format!("{}:{}", TEST_USERNAME, password_hash),
        ),
    ]);

    Config::from_vars(&vars).expect("Failed to build test config")
}

/// Build the full application router with the harness configuration.
pub fn test_router() -> Router {
    let state = Arc::new(AppState::new(test_config(), test_metrics_handle()));
    routes::build_routes(state)
}

/// Build a GET request with no `Authorization` header.
pub fn get(path: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .expect("Failed to build request")
}

/// Build a GET request with an arbitrary `Authorization` header value.
pub fn get_with_auth(path: &str, authorization: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(path)
        .header("Authorization", authorization)
        .body(Body::empty())
        .expect("Failed to build request")
}

/// Build a GET request carrying `Bearer <token>`.
pub fn get_with_bearer(path: &str, token: &str) -> Request<Body> {
    get_with_auth(path, &format!("Bearer {token}"))
}

/// Build a JSON POST request.
pub fn post_json(path: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(path)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

/// Read a response body as JSON.
pub async fn read_body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read response body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("Response body should be JSON")
}
