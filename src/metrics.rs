// Copyright 2025 Memophor Labs
// SPDX-License-Identifier: Apache-2.0

//! Prometheus metrics collection for Profile Relay.
//!
//! Tracks inbound profile requests, classified failures and upstream calls.

use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry};
use std::sync::Arc;

use crate::error::{AppError, ErrorCode};

/// Metrics collector for the relay
#[derive(Clone)]
pub struct Metrics {
    pub registry: Arc<Registry>,

    // Inbound request metrics
    pub profile_requests: IntCounter,
    pub profile_failures: IntCounterVec,

    // Upstream metrics
    pub upstream_requests: IntCounter,
    pub upstream_failures: IntCounter,
    pub upstream_latency: Histogram,
}

fn metric_error(e: prometheus::Error) -> AppError {
    AppError::Internal(anyhow::anyhow!("Failed to create metric: {}", e))
}

impl Metrics {
    pub fn new() -> Result<Self, AppError> {
        let registry = Registry::new();

        let profile_requests = IntCounter::with_opts(Opts::new(
            "profile_relay_requests_total",
            "Total number of profile lookups received",
        ))
        .map_err(metric_error)?;

        let profile_failures = IntCounterVec::new(
            Opts::new(
                "profile_relay_failures_total",
                "Total number of profile lookups that ended in an error outcome",
            ),
            &["code"],
        )
        .map_err(metric_error)?;

        let upstream_requests = IntCounter::with_opts(Opts::new(
            "profile_relay_upstream_requests_total",
            "Total number of calls made to the upstream profile API",
        ))
        .map_err(metric_error)?;

        let upstream_failures = IntCounter::with_opts(Opts::new(
            "profile_relay_upstream_failures_total",
            "Total number of upstream calls that did not yield a profile",
        ))
        .map_err(metric_error)?;

        let upstream_latency = Histogram::with_opts(
            HistogramOpts::new(
                "profile_relay_upstream_latency_seconds",
                "Duration of upstream profile requests in seconds",
            )
            .buckets(vec![
                0.005, 0.010, 0.025, 0.050, 0.100, 0.250, 0.500, 1.0, 2.0, 5.0,
            ]),
        )
        .map_err(metric_error)?;

        registry
            .register(Box::new(profile_requests.clone()))
            .map_err(metric_error)?;
        registry
            .register(Box::new(profile_failures.clone()))
            .map_err(metric_error)?;
        registry
            .register(Box::new(upstream_requests.clone()))
            .map_err(metric_error)?;
        registry
            .register(Box::new(upstream_failures.clone()))
            .map_err(metric_error)?;
        registry
            .register(Box::new(upstream_latency.clone()))
            .map_err(metric_error)?;

        Ok(Self {
            registry: Arc::new(registry),
            profile_requests,
            profile_failures,
            upstream_requests,
            upstream_failures,
            upstream_latency,
        })
    }

    /// Record an inbound profile lookup
    pub fn record_profile_request(&self) {
        self.profile_requests.inc();
    }

    /// Record a lookup that ended with the given error code
    pub fn record_profile_failure(&self, code: ErrorCode) {
        self.profile_failures.with_label_values(&[code.as_str()]).inc();
    }

    /// Record an upstream call attempt
    pub fn record_upstream_request(&self) {
        self.upstream_requests.inc();
    }

    /// Record an upstream call that failed
    pub fn record_upstream_failure(&self) {
        self.upstream_failures.inc();
    }

    /// Observe latency for an upstream call in seconds
    pub fn record_upstream_latency(&self, seconds: f64) {
        self.upstream_latency.observe(seconds);
    }

    /// Export metrics in Prometheus format
    pub fn export(&self) -> Result<String, AppError> {
        use prometheus::Encoder;

        let encoder = prometheus::TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode metrics: {}", e)))?;

        String::from_utf8(buffer).map_err(|e| {
            AppError::Internal(anyhow::anyhow!(
                "Failed to convert metrics to string: {}",
                e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_includes_recorded_series() {
        let metrics = Metrics::new().unwrap();
        metrics.record_profile_request();
        metrics.record_profile_failure(ErrorCode::NotFound);
        metrics.record_upstream_request();
        metrics.record_upstream_latency(0.02);

        let text = metrics.export().unwrap();

        assert!(text.contains("profile_relay_requests_total 1"));
        assert!(text.contains(r#"profile_relay_failures_total{code="NOT_FOUND"} 1"#));
        assert!(text.contains("profile_relay_upstream_requests_total 1"));
        assert!(text.contains("profile_relay_upstream_latency_seconds_count 1"));
    }

    #[test]
    fn instances_do_not_share_registries() {
        let first = Metrics::new().unwrap();
        let second = Metrics::new().unwrap();
        first.record_profile_request();

        assert_eq!(first.profile_requests.get(), 1);
        assert_eq!(second.profile_requests.get(), 0);
    }
}
