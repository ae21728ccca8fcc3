// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Queries over the pre-aggregated `review_keyword_stats` table.

use revlens_core::{KeywordQuery, KeywordStat, RevlensError};
use rusqlite::params_from_iter;
use rusqlite::types::Value;

use crate::database::{map_tr_err, Database};
use crate::filter::{not_blank, Predicates};

/// Keyword rows for the requested bucket, most frequent first.
pub async fn keywords(db: &Database, query: &KeywordQuery) -> Result<Vec<KeywordStat>, RevlensError> {
    let mut p = Predicates::new();
    p.eq("camera_model", query.camera.as_deref())
        .eq("sentiment_label", query.sentiment.as_deref());
    let limit = p.bind(Value::Integer(i64::from(query.limit)));
    let sql = format!(
        "SELECT camera_model, sentiment_label, keyword, COALESCE(freq, 0) AS freq \
         FROM review_keyword_stats {} \
         ORDER BY COALESCE(freq, 0) DESC, keyword ASC, id ASC LIMIT {limit}",
        p.where_clause()
    );

    db.connection()
        .call(move |conn| -> Result<Vec<KeywordStat>, rusqlite::Error> {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params_from_iter(p.params()), |row| {
                    let freq: i64 = row.get(3)?;
                    Ok(KeywordStat {
                        camera_model: row.get(0)?,
                        sentiment_label: row.get(1)?,
                        keyword: row.get(2)?,
                        freq: u64::try_from(freq).unwrap_or(0),
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
        .map_err(map_tr_err)
}

/// Camera models that have keyword statistics, ascending.
pub async fn keyword_camera_models(db: &Database) -> Result<Vec<String>, RevlensError> {
    let sql = format!(
        "SELECT DISTINCT camera_model FROM review_keyword_stats WHERE {} \
         ORDER BY camera_model ASC",
        not_blank("camera_model")
    );
    db.connection()
        .call(move |conn| -> Result<Vec<String>, rusqlite::Error> {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map([], |row| row.get(0))?
                .collect::<Result<Vec<String>, _>>()?;
            Ok(rows)
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{open_seeded, KeywordRow};

    fn stat(camera: &str, label: &str, keyword: &str, freq: i64) -> KeywordRow {
        KeywordRow {
            camera_model: camera.into(),
            sentiment_label: label.into(),
            keyword: keyword.into(),
            freq,
        }
    }

    fn fixture() -> Vec<KeywordRow> {
        vec![
            stat("X-T5", "positive", "sharp", 40),
            stat("X-T5", "positive", "colors", 55),
            stat("X-T5", "negative", "battery", 30),
            stat("R6", "positive", "autofocus", 70),
            stat("R6", "negative", "menus", 12),
            stat("R6", "negative", "battery", 12),
        ]
    }

    #[tokio::test]
    async fn keywords_filter_and_order_by_frequency() {
        let (_dir, db) = open_seeded(&[], &fixture()).await;

        let q = KeywordQuery::new(Some("X-T5"), Some("positive"), 20);
        let rows = keywords(&db, &q).await.unwrap();
        let words: Vec<&str> = rows.iter().map(|r| r.keyword.as_str()).collect();
        assert_eq!(words, vec!["colors", "sharp"]);

        let q = KeywordQuery::new(Some("R6"), Some("negative"), 20);
        let rows = keywords(&db, &q).await.unwrap();
        let words: Vec<&str> = rows.iter().map(|r| r.keyword.as_str()).collect();
        assert_eq!(words, vec!["battery", "menus"], "ties break by keyword");
    }

    #[tokio::test]
    async fn keywords_respect_limit() {
        let (_dir, db) = open_seeded(&[], &fixture()).await;
        let rows = keywords(&db, &KeywordQuery::new(None, None, 0)).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].keyword, "autofocus");

        let rows = keywords(&db, &KeywordQuery::new(None, None, 500)).await.unwrap();
        assert_eq!(rows.len(), 6);
    }

    #[tokio::test]
    async fn wildcard_camera_matches_unfiltered() {
        let (_dir, db) = open_seeded(&[], &fixture()).await;
        let wildcard = keywords(&db, &KeywordQuery::new(Some("ALL"), Some("all"), 200))
            .await
            .unwrap();
        let unfiltered = keywords(&db, &KeywordQuery::new(None, None, 100))
            .await
            .unwrap();
        assert_eq!(wildcard, unfiltered);
    }

    #[tokio::test]
    async fn unknown_bucket_is_empty() {
        let (_dir, db) = open_seeded(&[], &fixture()).await;
        let rows = keywords(&db, &KeywordQuery::new(Some("Z9"), None, 20))
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn keyword_cameras_are_distinct_sorted() {
        let (_dir, db) = open_seeded(&[], &fixture()).await;
        assert_eq!(keyword_camera_models(&db).await.unwrap(), vec!["R6", "X-T5"]);
    }

    #[tokio::test]
    async fn keyword_cameras_skip_whitespace_models() {
        let mut rows = fixture();
        rows.push(stat("\t", "positive", "grip", 3));
        rows.push(stat(" \n", "negative", "grip", 2));
        let (_dir, db) = open_seeded(&[], &rows).await;
        assert_eq!(keyword_camera_models(&db).await.unwrap(), vec!["R6", "X-T5"]);
    }
}
