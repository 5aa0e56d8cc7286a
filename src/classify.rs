// Copyright 2025 Memophor Labs
// SPDX-License-Identifier: Apache-2.0

//! Maps failure causes onto the fixed outcome taxonomy.
//!
//! Classification is pure apart from a single log line per failure.

use axum::http::StatusCode;

use crate::error::{AppError, ErrorCode, ErrorOutcome};

const UNREACHABLE_MESSAGE: &str = "Unable to connect to external service. Please try again later.";
const PROTOCOL_MESSAGE: &str = "External API returned an unreadable response";
const INTERNAL_MESSAGE: &str = "An unexpected error occurred. Please contact support.";

/// Produce exactly one outcome for a failure cause.
pub fn classify(error: &AppError) -> ErrorOutcome {
    match error {
        AppError::InvalidArgument(message) => {
            tracing::warn!(%message, "invalid argument");
            ErrorOutcome::new(
                ErrorCode::InvalidArgument,
                message.clone(),
                StatusCode::BAD_REQUEST.as_u16(),
            )
        }
        AppError::UpstreamStatus {
            status,
            username,
            detail,
        } => classify_status(*status, username, detail),
        AppError::Unreachable(cause) => {
            tracing::error!(%cause, "upstream unreachable");
            ErrorOutcome::new(
                ErrorCode::ResourceUnavailable,
                UNREACHABLE_MESSAGE,
                StatusCode::SERVICE_UNAVAILABLE.as_u16(),
            )
        }
        AppError::UpstreamProtocol(cause) => {
            tracing::error!(%cause, "unreadable upstream payload");
            ErrorOutcome::new(
                ErrorCode::UpstreamProtocolError,
                PROTOCOL_MESSAGE,
                StatusCode::BAD_GATEWAY.as_u16(),
            )
        }
        AppError::Internal(cause) => {
            tracing::error!(error = ?cause, "unexpected error");
            internal()
        }
    }
}

fn classify_status(status: u16, username: &str, detail: &str) -> ErrorOutcome {
    let status_line = describe_status(status);

    match status {
        404 => {
            tracing::warn!(username, "upstream user not found");
            ErrorOutcome::new(
                ErrorCode::NotFound,
                format!("User not found: {username}"),
                status,
            )
        }
        400..=499 => {
            tracing::warn!(status, detail, "upstream client error");
            ErrorOutcome::new(
                ErrorCode::HttpClientError,
                with_detail("Error fetching data from external API", &status_line, detail),
                status,
            )
        }
        500..=599 => {
            tracing::error!(status, detail, "upstream server error");
            ErrorOutcome::new(
                ErrorCode::HttpServerError,
                with_detail("External API server error", &status_line, detail),
                status,
            )
        }
        _ => {
            tracing::error!(status, "unexpected upstream status");
            internal()
        }
    }
}

fn internal() -> ErrorOutcome {
    ErrorOutcome::new(
        ErrorCode::InternalError,
        INTERNAL_MESSAGE,
        StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
    )
}

fn describe_status(status: u16) -> String {
    match StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
    {
        Some(reason) => format!("{status} {reason}"),
        None => status.to_string(),
    }
}

fn with_detail(prefix: &str, status_line: &str, detail: &str) -> String {
    let detail = detail.trim();
    if detail.is_empty() {
        format!("{prefix}: {status_line}")
    } else {
        format!("{prefix}: {status_line}: {detail}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upstream(status: u16, detail: &str) -> AppError {
        AppError::UpstreamStatus {
            status,
            username: "octocat".to_string(),
            detail: detail.to_string(),
        }
    }

    #[test]
    fn not_found_gets_custom_message() {
        let outcome = classify(&upstream(404, r#"{"message":"Not Found"}"#));

        assert_eq!(outcome.code, ErrorCode::NotFound);
        assert_eq!(outcome.status, 404);
        assert_eq!(outcome.message, "User not found: octocat");
    }

    #[test]
    fn other_client_errors_keep_upstream_status_and_detail() {
        let outcome = classify(&upstream(403, "API rate limit exceeded"));

        assert_eq!(outcome.code, ErrorCode::HttpClientError);
        assert_eq!(outcome.status, 403);
        assert_eq!(
            outcome.message,
            "Error fetching data from external API: 403 Forbidden: API rate limit exceeded"
        );
    }

    #[test]
    fn server_errors_keep_upstream_status() {
        let outcome = classify(&upstream(500, ""));
        assert_eq!(outcome.code, ErrorCode::HttpServerError);
        assert_eq!(outcome.status, 500);
        assert_eq!(
            outcome.message,
            "External API server error: 500 Internal Server Error"
        );

        let outcome = classify(&upstream(503, "maintenance"));
        assert_eq!(outcome.code, ErrorCode::HttpServerError);
        assert_eq!(outcome.status, 503);
    }

    #[test]
    fn unreachable_maps_to_503() {
        let outcome = classify(&AppError::Unreachable("connection refused".into()));

        assert_eq!(outcome.code, ErrorCode::ResourceUnavailable);
        assert_eq!(outcome.status, 503);
        assert!(!outcome.message.contains("refused"));
    }

    #[test]
    fn invalid_argument_maps_to_400() {
        let outcome = classify(&AppError::invalid_argument("Username cannot be null or empty"));

        assert_eq!(outcome.code, ErrorCode::InvalidArgument);
        assert_eq!(outcome.status, 400);
        assert_eq!(outcome.message, "Username cannot be null or empty");
    }

    #[test]
    fn protocol_error_maps_to_502() {
        let outcome = classify(&AppError::UpstreamProtocol("expected value".into()));

        assert_eq!(outcome.code, ErrorCode::UpstreamProtocolError);
        assert_eq!(outcome.status, 502);
    }

    #[test]
    fn unexpected_failures_do_not_leak_detail() {
        let outcome = classify(&AppError::Internal(anyhow::anyhow!("secret stack detail")));
        assert_eq!(outcome.code, ErrorCode::InternalError);
        assert_eq!(outcome.status, 500);
        assert!(!outcome.message.contains("secret"));

        let outcome = classify(&upstream(302, "moved"));
        assert_eq!(outcome.code, ErrorCode::InternalError);
        assert_eq!(outcome.status, 500);
    }
}
