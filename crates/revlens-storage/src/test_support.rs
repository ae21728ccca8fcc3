// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixture seeding for the query module tests.

use revlens_config::model::StorageConfig;
use rusqlite::params;
use tempfile::TempDir;

use crate::database::Database;

#[derive(Debug, Clone, Default)]
pub(crate) struct ReviewRow {
    pub content: Option<String>,
    pub created_at: Option<String>,
    pub camera_model: Option<String>,
    pub sentiment_label: Option<String>,
    pub sentiment_score: Option<f64>,
}

#[derive(Debug, Clone)]
pub(crate) struct KeywordRow {
    pub camera_model: String,
    pub sentiment_label: String,
    pub keyword: String,
    pub freq: i64,
}

pub(crate) fn storage_config(dir: &TempDir) -> StorageConfig {
    StorageConfig {
        database_path: dir.path().join("reviews.db").to_string_lossy().into_owned(),
        wal_mode: true,
        pool_size: 2,
        busy_timeout_ms: 1000,
    }
}

/// Open a fresh database in a temp dir and insert the given rows through a
/// separate writable connection.
pub(crate) async fn open_seeded(reviews: &[ReviewRow], stats: &[KeywordRow]) -> (TempDir, Database) {
    let dir = tempfile::tempdir().unwrap();
    let config = storage_config(&dir);
    let db = Database::open(&config).await.unwrap();

    let mut writer = rusqlite::Connection::open(&config.database_path).unwrap();
    let tx = writer.transaction().unwrap();
    for r in reviews {
        tx.execute(
            "INSERT INTO review (source, content, created_at, camera_model,
                                 sentiment_label, sentiment_score)
             VALUES ('test', ?1, ?2, ?3, ?4, ?5)",
            params![
                r.content,
                r.created_at,
                r.camera_model,
                r.sentiment_label,
                r.sentiment_score
            ],
        )
        .unwrap();
    }
    for s in stats {
        tx.execute(
            "INSERT INTO review_keyword_stats (camera_model, sentiment_label, keyword, freq, updated_at)
             VALUES (?1, ?2, ?3, ?4, '2026-01-01T00:00:00')",
            params![s.camera_model, s.sentiment_label, s.keyword, s.freq],
        )
        .unwrap();
    }
    tx.commit().unwrap();

    (dir, db)
}
