// Copyright 2025 Memophor Labs
// SPDX-License-Identifier: Apache-2.0

//! Failure causes and the outcome shape reported to callers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::classify::classify;

/// Everything that can go wrong while serving a profile request.
///
/// Variants carry the cause category and, for upstream HTTP failures, the
/// status code the upstream answered with. Turning a cause into a reported
/// outcome is the job of [`classify`].
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("upstream responded with status {status} for {username}")]
    UpstreamStatus {
        status: u16,
        username: String,
        detail: String,
    },
    #[error("upstream unreachable: {0}")]
    Unreachable(String),
    #[error("malformed upstream payload: {0}")]
    UpstreamProtocol(String),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn invalid_argument<T: Into<String>>(message: T) -> Self {
        Self::InvalidArgument(message.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        classify(&self).into_response()
    }
}

/// Stable error codes exposed to callers.
///
/// The wire spelling comes from [`ErrorCode::as_str`] alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidArgument,
    NotFound,
    HttpClientError,
    HttpServerError,
    ResourceUnavailable,
    UpstreamProtocolError,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidArgument => "INVALID_ARGUMENT",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::HttpClientError => "HTTP_CLIENT_ERROR",
            ErrorCode::HttpServerError => "HTTP_SERVER_ERROR",
            ErrorCode::ResourceUnavailable => "RESOURCE_UNAVAILABLE",
            ErrorCode::UpstreamProtocolError => "UPSTREAM_PROTOCOL_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Failure payload returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorOutcome {
    pub code: ErrorCode,
    pub message: String,
    pub status: u16,
    pub timestamp: DateTime<Utc>,
}

impl ErrorOutcome {
    pub fn new<T: Into<String>>(code: ErrorCode, message: T, status: u16) -> Self {
        Self {
            code,
            message: message.into(),
            status,
            timestamp: Utc::now(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ErrorOutcome {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_serialize_as_their_wire_names() {
        for code in [
            ErrorCode::InvalidArgument,
            ErrorCode::NotFound,
            ErrorCode::HttpClientError,
            ErrorCode::HttpServerError,
            ErrorCode::ResourceUnavailable,
            ErrorCode::UpstreamProtocolError,
            ErrorCode::InternalError,
        ] {
            let json = serde_json::to_value(code).unwrap();
            assert_eq!(json, serde_json::Value::String(code.as_str().to_string()));
        }

        assert_eq!(
            serde_json::to_value(ErrorCode::UpstreamProtocolError).unwrap(),
            "UPSTREAM_PROTOCOL_ERROR"
        );
        assert_eq!(
            serde_json::to_value(ErrorCode::ResourceUnavailable).unwrap(),
            "RESOURCE_UNAVAILABLE"
        );
    }

    #[test]
    fn outcome_serializes_all_fields() {
        let outcome = ErrorOutcome::new(ErrorCode::NotFound, "User not found: ghost", 404);
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "User not found: ghost");
        assert_eq!(json["status"], 404);
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn out_of_range_status_falls_back_to_500() {
        let outcome = ErrorOutcome::new(ErrorCode::InternalError, "boom", 42);
        assert_eq!(outcome.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn app_error_renders_through_classifier() {
        let response = AppError::invalid_argument("Username cannot be null or empty").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
