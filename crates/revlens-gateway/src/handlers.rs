// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the review API.
//!
//! Query strings are parsed leniently: every parameter arrives as text, and
//! anything missing, blank, repeated, or malformed falls back to its default
//! on its own instead of producing a 400. A query string axum cannot decode
//! at all is treated as empty.

use std::future::Future;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::Uri;
use axum::Json;
use serde::Serialize;
use tracing::debug;

use revlens_core::params::{
    normalize_keyword_filter, normalize_text, parse_int, ranking_threshold,
    DEFAULT_KEYWORD_LIMIT, DEFAULT_PAGE_SIZE, DEFAULT_RANKING_MIN_COUNT,
};
use revlens_core::{
    CameraRank, KeywordQuery, KeywordStat, PageRequest, Review, ReviewFilter, ReviewPage,
    ReviewSummary, RevlensError, SentimentDistribution,
};

use crate::error::ApiError;
use crate::server::AppState;

/// Response body for GET /api/health.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

type QueryPairs = Result<Query<Vec<(String, String)>>, QueryRejection>;

/// Raw query string pairs.
///
/// Each key is looked up on its own, so a repeated or malformed parameter
/// never discards its neighbours. The first occurrence of a key wins.
#[derive(Debug, Default)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// Unwrap extracted pairs, treating an undecodable query string as empty.
    pub fn from_extracted(params: QueryPairs) -> Self {
        match params {
            Ok(Query(pairs)) => Self(pairs),
            Err(rejection) => {
                debug!(%rejection, "ignoring malformed query string");
                Self::default()
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Run a store call under the configured request timeout.
async fn bounded<T>(
    state: &AppState,
    call: impl Future<Output = Result<T, RevlensError>>,
) -> Result<Json<T>, ApiError> {
    match tokio::time::timeout(state.request_timeout, call).await {
        Ok(result) => Ok(Json(result?)),
        Err(_) => Err(RevlensError::Timeout {
            duration: state.request_timeout,
        }
        .into()),
    }
}

/// GET /api/health
///
/// Liveness only; never touches the database.
pub async fn get_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /api/reviews?sentiment=
pub async fn get_latest(
    State(state): State<AppState>,
    params: QueryPairs,
) -> Result<Json<Vec<Review>>, ApiError> {
    let p = QueryParams::from_extracted(params);
    let sentiment = normalize_text(p.get("sentiment"));
    bounded(&state, state.reviews.latest(sentiment.as_deref())).await
}

/// GET /api/reviews/search?sentiment=&camera=&query=&page=&size=
pub async fn get_search(
    State(state): State<AppState>,
    params: QueryPairs,
) -> Result<Json<ReviewPage>, ApiError> {
    let p = QueryParams::from_extracted(params);
    let filter = ReviewFilter::new(p.get("sentiment"), p.get("camera"), p.get("query"));
    let page = PageRequest::new(
        parse_int(p.get("page"), 0),
        parse_int(p.get("size"), i64::from(DEFAULT_PAGE_SIZE)),
    );
    bounded(&state, state.reviews.search(&filter, page)).await
}

/// GET /api/stats/summary?camera=
pub async fn get_summary(
    State(state): State<AppState>,
    params: QueryPairs,
) -> Result<Json<ReviewSummary>, ApiError> {
    // Summary shares the keyword panel's camera picker, so `ALL` is a wildcard here too.
    let p = QueryParams::from_extracted(params);
    let camera = normalize_keyword_filter(p.get("camera"));
    bounded(&state, state.reviews.summary(camera.as_deref())).await
}

/// GET /api/stats/sentiment?camera=
pub async fn get_sentiment_distribution(
    State(state): State<AppState>,
    params: QueryPairs,
) -> Result<Json<SentimentDistribution>, ApiError> {
    let p = QueryParams::from_extracted(params);
    let camera = normalize_text(p.get("camera"));
    bounded(&state, state.reviews.sentiment_distribution(camera.as_deref())).await
}

/// GET /api/cameras
pub async fn get_cameras(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    bounded(&state, state.reviews.camera_models()).await
}

/// GET /api/stats/ranking?minCount=
pub async fn get_ranking(
    State(state): State<AppState>,
    params: QueryPairs,
) -> Result<Json<Vec<CameraRank>>, ApiError> {
    let p = QueryParams::from_extracted(params);
    let min_count = ranking_threshold(parse_int(
        p.get("minCount"),
        DEFAULT_RANKING_MIN_COUNT as i64,
    ));
    bounded(&state, state.reviews.camera_ranking(min_count)).await
}

/// GET /api/stats/keywords?camera=&sentiment=&limit=
pub async fn get_keywords(
    State(state): State<AppState>,
    params: QueryPairs,
) -> Result<Json<Vec<KeywordStat>>, ApiError> {
    let p = QueryParams::from_extracted(params);
    let query = KeywordQuery::new(
        p.get("camera"),
        p.get("sentiment"),
        parse_int(p.get("limit"), i64::from(DEFAULT_KEYWORD_LIMIT)),
    );
    bounded(&state, state.keywords.keywords(&query)).await
}

/// GET /api/stats/keywords/cameras
pub async fn get_keyword_cameras(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, ApiError> {
    bounded(&state, state.keywords.keyword_camera_models()).await
}

/// Fallback for unknown paths.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(uri.path())
}
