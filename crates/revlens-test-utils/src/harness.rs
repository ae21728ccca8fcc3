// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end API tests.
//!
//! `TestHarness` opens a real SQLite file in a temp directory through
//! [`SqliteStorage`], seeds it with a separate writable connection, and
//! serves requests through the production router without binding a socket.

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use revlens_config::model::StorageConfig;
use revlens_core::{RevlensError, StorageAdapter};
use revlens_gateway::{router, AppState};
use revlens_storage::SqliteStorage;

use crate::fixtures::{seed, KeywordStatFixture, ReviewFixture};

/// Builder for creating test environments with seeded rows.
pub struct TestHarnessBuilder {
    reviews: Vec<ReviewFixture>,
    keyword_stats: Vec<KeywordStatFixture>,
    request_timeout: Duration,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            reviews: Vec::new(),
            keyword_stats: Vec::new(),
            request_timeout: Duration::from_secs(10),
        }
    }

    pub fn with_reviews(mut self, reviews: Vec<ReviewFixture>) -> Self {
        self.reviews.extend(reviews);
        self
    }

    pub fn with_keyword_stats(mut self, stats: Vec<KeywordStatFixture>) -> Self {
        self.keyword_stats.extend(stats);
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Open storage, seed the fixtures, and return the harness.
    pub async fn build(self) -> Result<TestHarness, RevlensError> {
        let temp_dir = tempfile::TempDir::new().map_err(|e| RevlensError::Storage {
            source: Box::new(e),
        })?;
        let db_path = temp_dir.path().join("reviews.db");

        let storage_config = StorageConfig {
            database_path: db_path.to_string_lossy().into_owned(),
            wal_mode: true,
            pool_size: 2,
            busy_timeout_ms: 1000,
        };
        let storage = SqliteStorage::new(storage_config);
        storage.initialize().await?;

        let mut writer = rusqlite::Connection::open(&db_path).map_err(|e| RevlensError::Storage {
            source: Box::new(e),
        })?;
        seed(&mut writer, &self.reviews, &self.keyword_stats).map_err(|e| {
            RevlensError::Storage {
                source: Box::new(e),
            }
        })?;
        tracing::debug!(
            reviews = self.reviews.len(),
            keyword_stats = self.keyword_stats.len(),
            "test database seeded"
        );

        Ok(TestHarness {
            storage: Arc::new(storage),
            request_timeout: self.request_timeout,
            _temp_dir: temp_dir,
        })
    }
}

/// A seeded database plus the router that serves it.
pub struct TestHarness {
    /// SQLite storage over the temp database.
    pub storage: Arc<SqliteStorage>,
    request_timeout: Duration,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Fresh router sharing this harness's storage.
    pub fn router(&self) -> axum::Router {
        let state = AppState::new(
            self.storage.clone(),
            self.storage.clone(),
            self.request_timeout,
        );
        router(state, true)
    }

    /// Issue a GET and return the status with the raw body bytes.
    pub async fn get_raw(&self, uri: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("valid request");
        let response = self
            .router()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        (status, bytes.to_vec())
    }

    /// Issue a GET and parse the body as JSON.
    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, bytes) = self.get_raw(uri).await;
        let json = serde_json::from_slice(&bytes).expect("JSON body");
        (status, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{sample_keyword_stats, sample_reviews};
    use revlens_core::ReviewStore;

    #[tokio::test]
    async fn harness_seeds_rows() {
        let harness = TestHarness::builder()
            .with_reviews(sample_reviews())
            .with_keyword_stats(sample_keyword_stats())
            .build()
            .await
            .unwrap();
        let models = harness.storage.camera_models().await.unwrap();
        assert_eq!(models, vec!["R6", "X-T5", "Z6"]);
    }

    #[tokio::test]
    async fn harness_serves_health() {
        let harness = TestHarness::builder().build().await.unwrap();
        let (status, body) = harness.get("/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "OK");
    }
}
