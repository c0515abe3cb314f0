//! Prometheus metrics for summarizer-service.

use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::OnceLock;

// Global registry
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub static SUMMARIZE_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static UPSTREAM_REQUEST_DURATION_SECONDS: OnceLock<HistogramVec> = OnceLock::new();
pub static UPSTREAM_ERRORS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize all metrics. Later calls are no-ops.
pub fn init_metrics() {
    if REGISTRY.get().is_some() {
        return;
    }

    let registry = Registry::new();

    let summarize_requests = IntCounterVec::new(
        Opts::new("summarize_requests_total", "Total summarize requests by outcome"),
        &["outcome"],
    )
    .expect("Failed to create summarize_requests_total metric");

    let upstream_duration = HistogramVec::new(
        HistogramOpts::new(
            "upstream_request_duration_seconds",
            "Upstream generation API latency in seconds",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0, 120.0]),
        &["status"],
    )
    .expect("Failed to create upstream_request_duration_seconds metric");

    let upstream_errors = IntCounterVec::new(
        Opts::new("upstream_errors_total", "Total failed upstream calls"),
        &["error_type"],
    )
    .expect("Failed to create upstream_errors_total metric");

    registry
        .register(Box::new(summarize_requests.clone()))
        .expect("Failed to register summarize_requests_total");
    registry
        .register(Box::new(upstream_duration.clone()))
        .expect("Failed to register upstream_request_duration_seconds");
    registry
        .register(Box::new(upstream_errors.clone()))
        .expect("Failed to register upstream_errors_total");

    let _ = REGISTRY.set(registry);
    let _ = SUMMARIZE_REQUESTS_TOTAL.set(summarize_requests);
    let _ = UPSTREAM_REQUEST_DURATION_SECONDS.set(upstream_duration);
    let _ = UPSTREAM_ERRORS_TOTAL.set(upstream_errors);

    tracing::info!("Prometheus metrics initialized");
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();

    let registry = match REGISTRY.get() {
        Some(r) => r,
        None => {
            tracing::error!("Metrics registry not initialized");
            return "# Metrics registry not initialized\n".to_string();
        }
    };

    if let Err(e) = encoder.encode(&registry.gather(), &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return format!("# Failed to encode metrics: {}\n", e);
    }

    String::from_utf8(buffer).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to convert metrics to UTF-8");
        format!("# Failed to convert metrics to UTF-8: {}\n", e)
    })
}

/// Record how a summarize request ended (`ok`, `invalid`, or a provider error kind).
pub fn record_summarize_request(outcome: &str) {
    if let Some(counter) = SUMMARIZE_REQUESTS_TOTAL.get() {
        counter.with_label_values(&[outcome]).inc();
    }
}

/// Record upstream latency by response status.
pub fn record_upstream_latency(status: &str, duration_secs: f64) {
    if let Some(histogram) = UPSTREAM_REQUEST_DURATION_SECONDS.get() {
        histogram.with_label_values(&[status]).observe(duration_secs);
    }
}

/// Record a failed upstream call.
pub fn record_upstream_error(error_type: &str) {
    if let Some(counter) = UPSTREAM_ERRORS_TOTAL.get() {
        counter.with_label_values(&[error_type]).inc();
    }
}
