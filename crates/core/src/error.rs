// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for beacon-core operations.
//!
//! The dispatch engine recovers locally from almost everything: malformed
//! policy documents degrade to defaults, queue overflow evicts silently, and
//! send failures are logged and dropped. The variants here cover the few
//! conditions that are surfaced to the host.

use thiserror::Error;

/// All possible errors that can occur in beacon-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid settings: {0}\n  hint: account, profile, and environment are required")]
    InvalidSettings(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for beacon-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
