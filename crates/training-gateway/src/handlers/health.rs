//! Health check handler.
//!
//! The gateway is stateless, so liveness is simply the ability to respond.
//! The route is not on the bypass list: it reaches the handler through the
//! gate's anonymous-continuation path.

use axum::Json;
use tracing::instrument;

use crate::models::HealthResponse;

/// Handler for GET /health
///
/// ## Example Response
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "training-gateway",
///   "version": "0.1.0"
/// }
/// ```
#[instrument(skip_all, name = "tg.health.check")]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check_reports_healthy() {
        let Json(response) = health_check().await;

        assert_eq!(response.status, "healthy");
        assert_eq!(response.service, "training-gateway");
        assert!(!response.version.is_empty());
    }
}
