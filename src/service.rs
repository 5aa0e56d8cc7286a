// Copyright 2025 Memophor Labs
// SPDX-License-Identifier: Apache-2.0

//! Profile lookup orchestration.
//!
//! One call runs validation, the upstream fetch and the mapping, and ends in
//! either a profile or exactly one classified outcome.

use tokio::time::Instant;

use crate::classify::classify;
use crate::error::{AppError, ErrorOutcome};
use crate::metrics::Metrics;
use crate::model::UserProfile;
use crate::upstream::UpstreamClient;
use crate::validation::validate_username;

#[derive(Clone)]
pub struct ProfileService {
    upstream: UpstreamClient,
    metrics: Metrics,
}

impl ProfileService {
    pub fn new(upstream: UpstreamClient, metrics: Metrics) -> Self {
        Self { upstream, metrics }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Look up a profile by username.
    pub async fn get_profile(&self, username: Option<&str>) -> Result<UserProfile, ErrorOutcome> {
        self.metrics.record_profile_request();

        self.lookup(username).await.map_err(|error| {
            let outcome = classify(&error);
            self.metrics.record_profile_failure(outcome.code);
            outcome
        })
    }

    async fn lookup(&self, username: Option<&str>) -> Result<UserProfile, AppError> {
        let username = validate_username(username)?;

        self.metrics.record_upstream_request();
        let start = Instant::now();
        let result = self.upstream.fetch_user(username).await;
        self.metrics
            .record_upstream_latency(start.elapsed().as_secs_f64());

        if result.is_err() {
            self.metrics.record_upstream_failure();
        }

        result
    }
}
