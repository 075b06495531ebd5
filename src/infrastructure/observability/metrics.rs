//! Prometheus metrics definitions for the treasury service
//!
//! All metrics use the `fundtreasury_` prefix and are exposed on `/metrics`.

use prometheus::{
    CounterVec, Gauge, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
    core::{AtomicF64, GenericGauge},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,
    /// Number of funds in the registry
    pub funds_registered: GenericGauge<AtomicF64>,
    /// Registry mutations by entity and operation
    pub mutations_total: CounterVec,
    /// HTTP requests by route, method and status class
    pub http_requests_total: CounterVec,
    /// HTTP handling latency in seconds
    pub http_latency_seconds: HistogramVec,
    /// Uptime in seconds
    pub uptime_seconds: GenericGauge<AtomicF64>,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let funds_registered = Gauge::with_opts(Opts::new(
            "fundtreasury_funds_registered",
            "Number of funds in the registry",
        ))?;
        registry.register(Box::new(funds_registered.clone()))?;

        let mutations_total = CounterVec::new(
            Opts::new(
                "fundtreasury_mutations_total",
                "Registry mutations by entity and operation",
            ),
            &["entity", "operation"],
        )?;
        registry.register(Box::new(mutations_total.clone()))?;

        let http_requests_total = CounterVec::new(
            Opts::new(
                "fundtreasury_http_requests_total",
                "HTTP requests by route, method and status class",
            ),
            &["route", "method", "status"],
        )?;
        registry.register(Box::new(http_requests_total.clone()))?;

        let http_latency_seconds = HistogramVec::new(
            HistogramOpts::new(
                "fundtreasury_http_latency_seconds",
                "HTTP request handling latency in seconds",
            )
            .buckets(vec![0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.5, 1.0]),
            &["route"],
        )?;
        registry.register(Box::new(http_latency_seconds.clone()))?;

        let uptime_seconds = Gauge::with_opts(Opts::new(
            "fundtreasury_uptime_seconds",
            "Server uptime in seconds",
        ))?;
        registry.register(Box::new(uptime_seconds.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            funds_registered,
            mutations_total,
            http_requests_total,
            http_latency_seconds,
            uptime_seconds,
        })
    }

    /// Render all metrics in Prometheus text format
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        encoder
            .encode_to_string(&metric_families)
            .unwrap_or_default()
    }

    pub fn inc_mutation(&self, entity: &str, operation: &str) {
        self.mutations_total
            .with_label_values(&[entity, operation])
            .inc();
    }

    pub fn observe_request(&self, route: &str, method: &str, status: u16, latency: f64) {
        let class = format!("{}xx", status / 100);
        self.http_requests_total
            .with_label_values(&[route, method, class.as_str()])
            .inc();
        self.http_latency_seconds
            .with_label_values(&[route])
            .observe(latency);
    }
}
