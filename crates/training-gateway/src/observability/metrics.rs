//! Metrics definitions for Training Gateway.
//!
//! All metrics follow Prometheus naming conventions:
//! - `tg_` prefix for Training Gateway
//! - `_total` suffix for counters
//!
//! # Cardinality
//!
//! Labels are bounded to prevent cardinality explosion: the gate outcome
//! label has exactly five values (`bypass`, `anonymous`, `authenticated`,
//! `expired`, `invalid`).

use metrics::counter;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Install the global Prometheus recorder and return its render handle.
///
/// Must be called once per process, before any metric is recorded.
pub fn init_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Record one authentication gate decision.
///
/// Metric: `tg_auth_requests_total`
/// Labels: `outcome` (bypass | anonymous | authenticated | expired | invalid)
pub fn record_gate_outcome(outcome: &'static str) {
    counter!("tg_auth_requests_total", "outcome" => outcome).increment(1);
}

/// Record one token issuance.
///
/// Metric: `tg_tokens_issued_total`
/// Labels: `endpoint` (login | reissue)
pub fn record_token_issued(endpoint: &'static str) {
    counter!("tg_tokens_issued_total", "endpoint" => endpoint).increment(1);
}
