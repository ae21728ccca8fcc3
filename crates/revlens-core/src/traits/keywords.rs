// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only queries over pre-aggregated keyword frequencies.

use async_trait::async_trait;

use crate::error::RevlensError;
use crate::params::KeywordQuery;
use crate::traits::adapter::PluginAdapter;
use crate::types::KeywordStat;

/// Answers frequency-ranked keyword questions.
#[async_trait]
pub trait KeywordStatStore: PluginAdapter {
    /// Keyword rows matching the query, most frequent first, at most `query.limit`.
    async fn keywords(&self, query: &KeywordQuery) -> Result<Vec<KeywordStat>, RevlensError>;

    /// Distinct camera models that have keyword statistics, ascending.
    async fn keyword_camera_models(&self) -> Result<Vec<String>, RevlensError>;
}
