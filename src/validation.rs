// Copyright 2025 Memophor Labs
// SPDX-License-Identifier: Apache-2.0

use crate::error::AppError;

/// Reject an absent, empty or whitespace-only username.
///
/// The accepted value is returned untouched; no trimming or character rules.
pub fn validate_username(username: Option<&str>) -> Result<&str, AppError> {
    match username {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => {
            tracing::debug!("username is null or empty");
            Err(AppError::invalid_argument("Username cannot be null or empty"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn rejects_missing_empty_and_blank() {
        for candidate in [None, Some(""), Some("   "), Some("\t\n")] {
            let err = assert_err!(validate_username(candidate));
            assert!(matches!(err, AppError::InvalidArgument(_)));
        }
    }

    #[test]
    fn passes_value_through_unchanged() {
        assert_eq!(assert_ok!(validate_username(Some("octocat"))), "octocat");
        assert_eq!(assert_ok!(validate_username(Some(" octocat "))), " octocat ");
    }
}
