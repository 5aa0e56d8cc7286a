// Copyright 2025 Memophor Labs
// SPDX-License-Identifier: Apache-2.0

//! Profile shapes on both sides of the relay.
//!
//! [`UpstreamUser`] mirrors the GitHub `/users/{username}` payload and
//! [`UserProfile`] is what callers receive.

use serde::{Deserialize, Serialize};

/// Profile payload as served by the upstream API.
///
/// Every field is optional so that partial or `null`-laden payloads still map.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamUser {
    pub login: Option<String>,
    pub id: Option<u64>,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub public_repos: Option<u64>,
    pub followers: Option<u64>,
    pub created_at: Option<String>,
}

/// Profile returned to callers of the relay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub login: String,
    pub id: u64,
    /// Display name
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub public_repo_count: u64,
    pub follower_count: u64,
    /// Upstream timestamp, passed through unparsed
    pub created_at: Option<String>,
}

impl From<UpstreamUser> for UserProfile {
    fn from(user: UpstreamUser) -> Self {
        Self {
            login: user.login.unwrap_or_default(),
            id: user.id.unwrap_or_default(),
            name: user.name,
            avatar_url: user.avatar_url,
            public_repo_count: user.public_repos.unwrap_or_default(),
            follower_count: user.followers.unwrap_or_default(),
            created_at: user.created_at,
        }
    }
}
