//! Observability for the treasury service
//!
//! Prometheus counters and gauges, rendered in text format by the
//! `/metrics` endpoint. Request logging goes through `tracing`.

pub mod metrics;

pub use metrics::Metrics;
