// Copyright 2025 Memophor Labs
// SPDX-License-Identifier: Apache-2.0

//! Upstream client for Profile Relay.
//!
//! Builds the outbound GitHub profile request for a username and translates
//! the exchange into a local profile or a tagged failure. The network call
//! itself goes through a [`Transport`], so tests can substitute a fake.

use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use url::Url;

use crate::error::AppError;
use crate::model::{UpstreamUser, UserProfile};

pub const ACCEPT_HEADER: (&str, &str) = ("Accept", "application/vnd.github.v3+json");
pub const API_VERSION_HEADER: (&str, &str) = ("X-GitHub-Api-Version", "2022-11-28");

/// A fully built outbound GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamRequest {
    pub url: Url,
    pub headers: Vec<(&'static str, &'static str)>,
}

/// Raw result of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Why a transport could not complete an exchange.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("{0}")]
    Other(String),
}

/// Performs the actual network exchange.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: UpstreamRequest) -> Result<TransportResponse, TransportError>;
}

/// [`Transport`] backed by a shared `reqwest` client.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Construct a transport with the given request timeout.
    pub fn try_new(timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("profile-relay/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Internal(anyhow!("Failed to build upstream client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: UpstreamRequest) -> Result<TransportResponse, TransportError> {
        let mut builder = self.client.get(request.url);
        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;

        Ok(TransportResponse { status, body })
    }
}

fn transport_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout(error.to_string())
    } else if error.is_connect() {
        TransportError::Connect(error.to_string())
    } else {
        TransportError::Other(error.to_string())
    }
}

/// Adapter between the relay and the upstream profile API.
#[derive(Clone)]
pub struct UpstreamClient {
    base_url: Url,
    transport: Arc<dyn Transport>,
}

impl UpstreamClient {
    pub fn new(base_url: Url, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url,
            transport,
        }
    }

    /// Build the GET request for `username`, appended as one path segment.
    ///
    /// `.` and `..` cannot be expressed as a single segment, so no account
    /// can exist under them; they are reported as not found without a call.
    pub fn request_for(&self, username: &str) -> Result<UpstreamRequest, AppError> {
        if matches!(username, "." | "..") {
            return Err(AppError::UpstreamStatus {
                status: 404,
                username: username.to_string(),
                detail: String::new(),
            });
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                AppError::Internal(anyhow!("upstream base url {} cannot be a base", self.base_url))
            })?
            .pop_if_empty()
            .push(username);

        Ok(UpstreamRequest {
            url,
            headers: vec![ACCEPT_HEADER, API_VERSION_HEADER],
        })
    }

    /// Fetch and map the profile for an already validated username.
    pub async fn fetch_user(&self, username: &str) -> Result<UserProfile, AppError> {
        let request = self.request_for(username)?;
        tracing::info!(url = %request.url, "fetching user from upstream");

        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| match e {
                TransportError::Connect(_) | TransportError::Timeout(_) => {
                    AppError::Unreachable(e.to_string())
                }
                TransportError::Other(_) => {
                    AppError::Internal(anyhow!("Upstream request failed: {}", e))
                }
            })?;

        if !(200..300).contains(&response.status) {
            return Err(AppError::UpstreamStatus {
                status: response.status,
                username: username.to_string(),
                detail: response.body,
            });
        }

        let payload: UpstreamUser = serde_json::from_str(&response.body)
            .map_err(|e| AppError::UpstreamProtocol(e.to_string()))?;

        tracing::info!(username, "retrieved upstream user");

        Ok(payload.into())
    }
}
