//! Observability for Training Gateway.

pub mod metrics;
