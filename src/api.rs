// Copyright 2025 Memophor Labs
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! HTTP API handlers for Profile Relay.
//!
//! - `GET /healthz` - Service health check
//! - `GET /metrics` - Prometheus metrics export
//! - `GET /api/github/users/:username` - Relay a GitHub profile lookup

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use crate::error::{AppError, ErrorOutcome};
use crate::model::UserProfile;
use crate::service::ProfileService;

#[derive(Clone)]
pub struct AppState {
    pub profiles: ProfileService,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health))
        .route("/metrics", get(metrics))
        .route("/api/github/users/", get(handle_missing_username))
        .route("/api/github/users/:username", get(handle_get_user))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health() -> Result<Json<serde_json::Value>, AppError> {
    Ok(Json(serde_json::json!({
        "status": "healthy",
        "service": "profile-relay",
        "version": env!("CARGO_PKG_VERSION"),
    })))
}

/// Metrics endpoint
pub async fn metrics(State(state): State<AppState>) -> Result<String, AppError> {
    state.profiles.metrics().export()
}

/// Relay a profile lookup for one username
pub async fn handle_get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<UserProfile>, ErrorOutcome> {
    tracing::info!(%username, "fetching user information");

    let profile = state.profiles.get_profile(Some(&username)).await?;

    tracing::info!(%username, "fetched user information");
    Ok(Json(profile))
}

pub async fn handle_missing_username(
    State(state): State<AppState>,
) -> Result<Json<UserProfile>, ErrorOutcome> {
    state.profiles.get_profile(None).await.map(Json)
}
