// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Revlens review service.
//!
//! This crate provides the error type, the record and response types, the
//! parameter normalization rules, and the store traits that the storage
//! backend implements and the HTTP gateway consumes.

pub mod error;
pub mod params;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::RevlensError;
pub use params::{KeywordQuery, PageRequest, ReviewFilter};
pub use types::{
    CameraRank, HealthStatus, KeywordStat, Review, ReviewPage, ReviewSummary,
    SentimentDistribution,
};

pub use traits::{KeywordStatStore, PluginAdapter, ReviewStore, StorageAdapter};
