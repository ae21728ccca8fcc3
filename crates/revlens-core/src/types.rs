// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record and response types shared by the store traits and the HTTP gateway.
//!
//! Every type serializes with camelCase field names, which is the shape the
//! dashboard client consumes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Bucket name used for reviews whose sentiment label is null or blank.
pub const UNKNOWN_SENTIMENT: &str = "unknown";

/// Number of decimal places kept on every reported average.
pub const AVERAGE_PRECISION: i32 = 3;

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// One ingested product review with its optional sentiment annotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    pub source: Option<String>,
    pub rating: Option<f64>,
    pub content: Option<String>,
    /// ISO-8601 ingestion timestamp.
    pub created_at: Option<String>,
    pub camera_model: Option<String>,
    pub sentiment_label: Option<String>,
    pub sentiment_score: Option<f64>,
    pub sentiment_model: Option<String>,
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPage {
    pub content: Vec<Review>,
    /// Zero-based page index.
    pub page: u32,
    pub size: u32,
    pub total_pages: u64,
    pub total_elements: u64,
}

impl ReviewPage {
    /// Assemble a page, deriving the total page count from the element count.
    pub fn new(content: Vec<Review>, page: u32, size: u32, total_elements: u64) -> Self {
        let total_pages = if size == 0 {
            0
        } else {
            total_elements.div_ceil(u64::from(size))
        };
        Self {
            content,
            page,
            size,
            total_pages,
            total_elements,
        }
    }
}

/// Review count and mean sentiment score, globally and for one camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub count: u64,
    pub avg_sentiment_score: f64,
    pub global_count: u64,
    pub global_avg_sentiment_score: f64,
    /// The camera the first two fields are restricted to, `None` when unfiltered.
    pub camera: Option<String>,
}

/// Review counts per sentiment label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub total: u64,
    pub buckets: BTreeMap<String, u64>,
}

impl SentimentDistribution {
    /// Build a distribution from `(label, count)` rows; `total` is their sum.
    pub fn from_buckets(rows: impl IntoIterator<Item = (String, u64)>) -> Self {
        let mut buckets = BTreeMap::new();
        for (label, count) in rows {
            *buckets.entry(label).or_insert(0) += count;
        }
        let total = buckets.values().sum();
        Self { total, buckets }
    }
}

/// One row of the per-camera sentiment ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraRank {
    pub camera: String,
    pub count: u64,
    pub avg_sentiment_score: f64,
}

/// One pre-aggregated keyword frequency for a camera and sentiment bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordStat {
    pub camera_model: String,
    pub sentiment_label: String,
    pub keyword: String,
    pub freq: u64,
}

/// Round an average to [`AVERAGE_PRECISION`] decimals, mapping missing or
/// non-finite values to `0.0`.
pub fn round_average(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => {
            let factor = 10f64.powi(AVERAGE_PRECISION);
            let rounded = (v * factor).round() / factor;
            // -0.0 would serialize as "-0.0".
            if rounded == 0.0 { 0.0 } else { rounded }
        }
        _ => 0.0,
    }
}
