//! Prometheus metrics endpoint handler.
//!
//! # Security
//!
//! No PII or secrets are exposed in metrics - only operational counters
//! with bounded cardinality labels. The route is not on the bypass list,
//! so it is reachable anonymously through the gate like any other route
//! that tolerates anonymous access.

use axum::extract::State;
use axum::response::IntoResponse;
use std::sync::Arc;

use crate::routes::AppState;

/// Handler for GET /metrics
///
/// Returns Prometheus text-format metrics for scraping:
///
/// ```text
/// # TYPE tg_auth_requests_total counter
/// tg_auth_requests_total{outcome="authenticated"} 42
/// ```
#[tracing::instrument(skip_all, name = "tg.metrics.scrape")]
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.metrics_handle.render()
}

#[cfg(test)]
mod tests {
    // A PrometheusHandle can only be installed once per process, so the
    // endpoint is covered by the integration tests, which share a single
    // recorder across the whole test binary.
}
