// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query parameter normalization.
//!
//! Callers hand in raw, possibly malformed values. Everything here is total:
//! blank text becomes "no constraint", numbers outside their range are
//! clamped, and unparseable numbers fall back to their defaults.

/// Number of reviews returned by the "latest" listing.
pub const LATEST_LIMIT: u32 = 20;

/// Default page size for review search.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size review search will serve.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Default number of keyword rows.
pub const DEFAULT_KEYWORD_LIMIT: u32 = 20;

/// Largest number of keyword rows served per request.
pub const MAX_KEYWORD_LIMIT: u32 = 100;

/// Minimum number of scored reviews a camera needs to appear in the ranking.
pub const DEFAULT_RANKING_MIN_COUNT: u64 = 30;

/// Filter value meaning "every camera" / "every sentiment" on keyword lookups.
pub const KEYWORD_WILDCARD: &str = "ALL";

/// Trim a text parameter; blank or absent means "no constraint".
pub fn normalize_text(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Like [`normalize_text`], additionally treating `ALL` (any case) as absent.
pub fn normalize_keyword_filter(value: Option<&str>) -> Option<String> {
    normalize_text(value).filter(|v| !v.eq_ignore_ascii_case(KEYWORD_WILDCARD))
}

/// Parse an integer parameter, falling back to `default` when absent or malformed.
pub fn parse_int(value: Option<&str>, default: i64) -> i64 {
    value
        .map(str::trim)
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(default)
}

/// Clamp a requested row count into `[1, max]`.
pub fn clamp_limit(requested: i64, max: u32) -> u32 {
    requested.clamp(1, i64::from(max)) as u32
}

/// Conjunctive filter over reviews. `None` fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewFilter {
    /// Exact match on the sentiment label.
    pub sentiment: Option<String>,
    /// Exact match on the camera model.
    pub camera: Option<String>,
    /// Case-insensitive substring of the review content.
    pub query: Option<String>,
}

impl ReviewFilter {
    pub fn new(sentiment: Option<&str>, camera: Option<&str>, query: Option<&str>) -> Self {
        Self {
            sentiment: normalize_text(sentiment),
            camera: normalize_text(camera),
            query: normalize_text(query),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sentiment.is_none() && self.camera.is_none() && self.query.is_none()
    }
}

/// Zero-based page request with bounded size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    /// Negative pages become page 0; size is clamped to `[1, MAX_PAGE_SIZE]`.
    pub fn new(page: i64, size: i64) -> Self {
        Self {
            page: page.clamp(0, i64::from(u32::MAX)) as u32,
            size: clamp_limit(size, MAX_PAGE_SIZE),
        }
    }

    /// Row offset of the first element on this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Keyword lookup parameters after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordQuery {
    pub camera: Option<String>,
    pub sentiment: Option<String>,
    /// Always within `[1, MAX_KEYWORD_LIMIT]`.
    pub limit: u32,
}

impl KeywordQuery {
    pub fn new(camera: Option<&str>, sentiment: Option<&str>, limit: i64) -> Self {
        Self {
            camera: normalize_keyword_filter(camera),
            sentiment: normalize_keyword_filter(sentiment),
            limit: clamp_limit(limit, MAX_KEYWORD_LIMIT),
        }
    }
}

impl Default for KeywordQuery {
    fn default() -> Self {
        Self {
            camera: None,
            sentiment: None,
            limit: DEFAULT_KEYWORD_LIMIT,
        }
    }
}

/// Ranking threshold; negative requests behave like zero.
pub fn ranking_threshold(min_count: i64) -> u64 {
    min_count.max(0) as u64
}
