// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the storage and query traits.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use revlens_config::model::StorageConfig;
use revlens_core::params::{normalize_keyword_filter, normalize_text};
use revlens_core::{
    CameraRank, HealthStatus, KeywordQuery, KeywordStat, KeywordStatStore, PageRequest,
    PluginAdapter, Review, ReviewFilter, ReviewPage, ReviewStore, ReviewSummary, RevlensError,
    SentimentDistribution, StorageAdapter,
};

use crate::database::Database;
use crate::queries;

/// SQLite-backed review store.
///
/// The database is opened lazily by [`StorageAdapter::initialize`]; query
/// methods fail with a storage error until then.
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// Create a new SqliteStorage with the given configuration.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    fn db(&self) -> Result<&Database, RevlensError> {
        self.db.get().ok_or_else(|| RevlensError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, RevlensError> {
        let db = match self.db.get() {
            Some(db) => db,
            None => return Ok(HealthStatus::Unhealthy("not initialized".into())),
        };
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.query_row("SELECT 1", [], |_| Ok(()))?;
                Ok(())
            })
            .await
            .map_err(|e| RevlensError::HealthCheckFailed {
                name: self.name().to_string(),
                source: Box::new(e),
            })?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), RevlensError> {
        if self.db.get().is_some() {
            self.close().await?;
        }
        Ok(())
    }
}

#[async_trait]
impl StorageAdapter for SqliteStorage {
    async fn initialize(&self) -> Result<(), RevlensError> {
        let db = Database::open(&self.config).await?;
        self.db.set(db).map_err(|_| RevlensError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), RevlensError> {
        self.db()?.close().await
    }
}

#[async_trait]
impl ReviewStore for SqliteStorage {
    async fn latest(&self, sentiment: Option<&str>) -> Result<Vec<Review>, RevlensError> {
        let sentiment = normalize_text(sentiment);
        debug!(sentiment = ?sentiment, "latest reviews");
        queries::reviews::latest(self.db()?, sentiment.as_deref()).await
    }

    async fn search(
        &self,
        filter: &ReviewFilter,
        page: PageRequest,
    ) -> Result<ReviewPage, RevlensError> {
        debug!(?filter, page = page.page, size = page.size, "search reviews");
        queries::reviews::search(self.db()?, filter, page).await
    }

    async fn summary(&self, camera: Option<&str>) -> Result<ReviewSummary, RevlensError> {
        let camera = normalize_keyword_filter(camera);
        debug!(camera = ?camera, "review summary");
        queries::reviews::summary(self.db()?, camera.as_deref()).await
    }

    async fn sentiment_distribution(
        &self,
        camera: Option<&str>,
    ) -> Result<SentimentDistribution, RevlensError> {
        let camera = normalize_text(camera);
        debug!(camera = ?camera, "sentiment distribution");
        queries::reviews::sentiment_distribution(self.db()?, camera.as_deref()).await
    }

    async fn camera_models(&self) -> Result<Vec<String>, RevlensError> {
        queries::reviews::camera_models(self.db()?).await
    }

    async fn camera_ranking(&self, min_count: u64) -> Result<Vec<CameraRank>, RevlensError> {
        debug!(min_count, "camera ranking");
        queries::reviews::camera_ranking(self.db()?, min_count).await
    }
}

#[async_trait]
impl KeywordStatStore for SqliteStorage {
    async fn keywords(&self, query: &KeywordQuery) -> Result<Vec<KeywordStat>, RevlensError> {
        debug!(?query, "keyword lookup");
        queries::keyword_stats::keywords(self.db()?, query).await
    }

    async fn keyword_camera_models(&self) -> Result<Vec<String>, RevlensError> {
        queries::keyword_stats::keyword_camera_models(self.db()?).await
    }
}
