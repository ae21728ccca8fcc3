// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only queries over the review collection.

use async_trait::async_trait;

use crate::error::RevlensError;
use crate::params::{PageRequest, ReviewFilter};
use crate::traits::adapter::PluginAdapter;
use crate::types::{CameraRank, Review, ReviewPage, ReviewSummary, SentimentDistribution};

/// Answers read-only questions about reviews.
///
/// Parameters arrive already normalized: a `None` filter field never
/// constrains, and a caller cannot ask for rows where a field IS NULL.
#[async_trait]
pub trait ReviewStore: PluginAdapter {
    /// Up to 20 most recent reviews, newest first, optionally for one sentiment label.
    async fn latest(&self, sentiment: Option<&str>) -> Result<Vec<Review>, RevlensError>;

    /// Filtered, paginated search ordered newest first.
    async fn search(
        &self,
        filter: &ReviewFilter,
        page: PageRequest,
    ) -> Result<ReviewPage, RevlensError>;

    /// Global review count and mean score, plus the same for one camera.
    async fn summary(&self, camera: Option<&str>) -> Result<ReviewSummary, RevlensError>;

    /// Review counts per sentiment label, optionally for one camera.
    async fn sentiment_distribution(
        &self,
        camera: Option<&str>,
    ) -> Result<SentimentDistribution, RevlensError>;

    /// Distinct non-blank camera models, ascending.
    async fn camera_models(&self) -> Result<Vec<String>, RevlensError>;

    /// Cameras with at least `min_count` scored reviews, best mean score first.
    async fn camera_ranking(&self, min_count: u64) -> Result<Vec<CameraRank>, RevlensError>;
}
