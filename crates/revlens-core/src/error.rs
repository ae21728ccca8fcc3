// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Revlens review service.

use thiserror::Error;

/// The primary error type used across all Revlens store traits and services.
///
/// The query surface is read-only and tolerant of bad parameters, so there are
/// no business-rule variants: every error is an infrastructure failure.
#[derive(Debug, Error)]
pub enum RevlensError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, row decoding).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Adapter health check failed.
    #[error("health check failed for {name}: {source}")]
    HealthCheckFailed {
        name: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RevlensError {
    /// Returns true for errors caused by the backing store rather than the service itself.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            RevlensError::Storage { .. } | RevlensError::HealthCheckFailed { .. }
        )
    }
}
