// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Row fixtures written straight into the review tables.

use rusqlite::{params, Connection};

/// A `review` row to insert. Unset fields are stored as NULL.
#[derive(Debug, Clone, Default)]
pub struct ReviewFixture {
    pub source: Option<String>,
    pub rating: Option<f64>,
    pub content: Option<String>,
    pub created_at: Option<String>,
    pub camera_model: Option<String>,
    pub sentiment_label: Option<String>,
    pub sentiment_score: Option<f64>,
    pub sentiment_model: Option<String>,
}

impl ReviewFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn camera(mut self, camera: &str) -> Self {
        self.camera_model = Some(camera.to_string());
        self
    }

    pub fn score(mut self, score: f64) -> Self {
        self.sentiment_score = Some(score);
        self
    }

    pub fn label(mut self, label: &str) -> Self {
        self.sentiment_label = Some(label.to_string());
        self
    }

    pub fn content(mut self, content: &str) -> Self {
        self.content = Some(content.to_string());
        self
    }

    pub fn created_at(mut self, ts: &str) -> Self {
        self.created_at = Some(ts.to_string());
        self
    }
}

/// A `review_keyword_stats` row to insert.
#[derive(Debug, Clone)]
pub struct KeywordStatFixture {
    pub camera_model: String,
    pub sentiment_label: String,
    pub keyword: String,
    pub freq: i64,
}

impl KeywordStatFixture {
    pub fn new(camera: &str, label: &str, keyword: &str, freq: i64) -> Self {
        Self {
            camera_model: camera.to_string(),
            sentiment_label: label.to_string(),
            keyword: keyword.to_string(),
            freq,
        }
    }
}

/// Insert fixtures in one transaction.
pub fn seed(
    conn: &mut Connection,
    reviews: &[ReviewFixture],
    stats: &[KeywordStatFixture],
) -> Result<(), rusqlite::Error> {
    let tx = conn.transaction()?;
    {
        let mut insert_review = tx.prepare(
            "INSERT INTO review (source, rating, content, created_at, camera_model,
                                 sentiment_label, sentiment_score, sentiment_model)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )?;
        for r in reviews {
            insert_review.execute(params![
                r.source,
                r.rating,
                r.content,
                r.created_at,
                r.camera_model,
                r.sentiment_label,
                r.sentiment_score,
                r.sentiment_model,
            ])?;
        }

        let mut insert_stat = tx.prepare(
            "INSERT INTO review_keyword_stats
                 (camera_model, sentiment_label, keyword, freq, updated_at)
             VALUES (?1, ?2, ?3, ?4, '2026-01-01T00:00:00')",
        )?;
        for s in stats {
            insert_stat.execute(params![s.camera_model, s.sentiment_label, s.keyword, s.freq])?;
        }
    }
    tx.commit()
}

/// A small mixed dataset: three cameras, every sentiment label, a null and a
/// blank label, one unscored review, and keyword stats for two cameras.
pub fn sample_reviews() -> Vec<ReviewFixture> {
    vec![
        ReviewFixture::new()
            .camera("X-T5")
            .label("positive")
            .score(0.92)
            .content("Colors straight out of camera are gorgeous")
            .created_at("2026-03-01T10:00:00"),
        ReviewFixture::new()
            .camera("X-T5")
            .label("negative")
            .score(0.15)
            .content("Battery life is poor")
            .created_at("2026-03-02T10:00:00"),
        ReviewFixture::new()
            .camera("R6")
            .label("positive")
            .score(0.88)
            .content("Autofocus never misses")
            .created_at("2026-03-03T10:00:00"),
        ReviewFixture::new()
            .camera("R6")
            .label("neutral")
            .score(0.5)
            .content("Fine for video, menus are dense")
            .created_at("2026-03-04T10:00:00"),
        ReviewFixture::new()
            .camera("Z6")
            .content("Not yet classified")
            .created_at("2026-03-05T10:00:00"),
        ReviewFixture::new()
            .camera("Z6")
            .label(" ")
            .score(0.4)
            .content("autofocus hunts in low light")
            .created_at("2026-03-06T10:00:00"),
    ]
}

pub fn sample_keyword_stats() -> Vec<KeywordStatFixture> {
    vec![
        KeywordStatFixture::new("X-T5", "positive", "colors", 55),
        KeywordStatFixture::new("X-T5", "positive", "sharp", 40),
        KeywordStatFixture::new("X-T5", "negative", "battery", 30),
        KeywordStatFixture::new("R6", "positive", "autofocus", 70),
        KeywordStatFixture::new("R6", "neutral", "menus", 12),
    ]
}
