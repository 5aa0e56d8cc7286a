// Copyright 2025 Memophor Labs
// SPDX-License-Identifier: Apache-2.0

//! Profile Relay: a single-endpoint HTTP relay for GitHub user profiles.

pub mod api;
pub mod classify;
pub mod config;
pub mod error;
pub mod metrics;
pub mod model;
pub mod service;
pub mod upstream;
pub mod validation;
