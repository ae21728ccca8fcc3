// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Queries over the `review` table.

use revlens_core::params::LATEST_LIMIT;
use revlens_core::types::{round_average, UNKNOWN_SENTIMENT};
use revlens_core::{
    CameraRank, PageRequest, Review, ReviewFilter, ReviewPage, ReviewSummary, RevlensError,
    SentimentDistribution,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Row};

use crate::database::{map_tr_err, Database};
use crate::filter::{not_blank, Predicates};

const REVIEW_COLUMNS: &str = "id, source, rating, content, created_at, camera_model, \
     sentiment_label, sentiment_score, sentiment_model";

fn row_to_review(row: &Row<'_>) -> Result<Review, rusqlite::Error> {
    Ok(Review {
        id: row.get(0)?,
        source: row.get(1)?,
        rating: row.get(2)?,
        content: row.get(3)?,
        created_at: row.get(4)?,
        camera_model: row.get(5)?,
        sentiment_label: row.get(6)?,
        sentiment_score: row.get(7)?,
        sentiment_model: row.get(8)?,
    })
}

fn review_predicates(filter: &ReviewFilter) -> Predicates {
    let mut p = Predicates::new();
    p.eq("sentiment_label", filter.sentiment.as_deref())
        .eq("camera_model", filter.camera.as_deref())
        .contains_ci("content", filter.query.as_deref());
    p
}

/// The most recent reviews, newest first.
pub async fn latest(db: &Database, sentiment: Option<&str>) -> Result<Vec<Review>, RevlensError> {
    let mut p = Predicates::new();
    p.eq("sentiment_label", sentiment);
    let limit = p.bind(Value::Integer(i64::from(LATEST_LIMIT)));
    let sql = format!(
        "SELECT {REVIEW_COLUMNS} FROM review {} \
         ORDER BY created_at DESC, id DESC LIMIT {limit}",
        p.where_clause()
    );

    db.connection()
        .call(move |conn| -> Result<Vec<Review>, rusqlite::Error> {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params_from_iter(p.params()), row_to_review)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
        .map_err(map_tr_err)
}

/// One page of reviews matching every present filter, newest first.
pub async fn search(
    db: &Database,
    filter: &ReviewFilter,
    page: PageRequest,
) -> Result<ReviewPage, RevlensError> {
    let p = review_predicates(filter);
    let where_clause = p.where_clause();
    let count_sql = format!("SELECT COUNT(*) FROM review {where_clause}");

    let count_params = p.params().to_vec();
    let mut page_p = p;
    let limit = page_p.bind(Value::Integer(i64::from(page.size)));
    let offset = page_p.bind(Value::Integer(
        i64::try_from(page.offset()).unwrap_or(i64::MAX),
    ));
    let page_sql = format!(
        "SELECT {REVIEW_COLUMNS} FROM review {where_clause} \
         ORDER BY created_at DESC, id DESC LIMIT {limit} OFFSET {offset}"
    );

    let (content, total) = db
        .connection()
        .call(move |conn| -> Result<(Vec<Review>, i64), rusqlite::Error> {
            // Both statements read the same snapshot.
            let tx = conn.transaction()?;
            let total: i64 =
                tx.query_row(&count_sql, params_from_iter(count_params.iter()), |row| {
                    row.get(0)
                })?;
            let content = {
                let mut stmt = tx.prepare(&page_sql)?;
                stmt.query_map(params_from_iter(page_p.params()), row_to_review)?
                    .collect::<Result<Vec<_>, _>>()?
            };
            tx.commit()?;
            Ok((content, total))
        })
        .await
        .map_err(map_tr_err)?;

    Ok(ReviewPage::new(
        content,
        page.page,
        page.size,
        u64::try_from(total).unwrap_or(0),
    ))
}

/// Review count and mean score over all reviews, and over one camera when given.
pub async fn summary(db: &Database, camera: Option<&str>) -> Result<ReviewSummary, RevlensError> {
    let camera = camera.map(str::to_string);
    let scoped_camera = camera.clone();

    let ((global_count, global_avg), scoped) = db
        .connection()
        .call(
            move |conn| -> Result<((i64, Option<f64>), Option<(i64, Option<f64>)>), rusqlite::Error> {
                let tx = conn.transaction()?;
                let global = tx.query_row(
                    "SELECT COUNT(*), AVG(sentiment_score) FROM review",
                    [],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )?;
                let scoped = match &scoped_camera {
                    Some(cam) => Some(tx.query_row(
                        "SELECT COUNT(*), AVG(sentiment_score) FROM review WHERE camera_model = ?1",
                        params![cam],
                        |row| Ok((row.get(0)?, row.get(1)?)),
                    )?),
                    None => None,
                };
                tx.commit()?;
                Ok((global, scoped))
            },
        )
        .await
        .map_err(map_tr_err)?;

    let global_count = u64::try_from(global_count).unwrap_or(0);
    let global_avg = round_average(global_avg);
    let (count, avg) = match scoped {
        Some((count, avg)) => (u64::try_from(count).unwrap_or(0), round_average(avg)),
        None => (global_count, global_avg),
    };

    Ok(ReviewSummary {
        count,
        avg_sentiment_score: avg,
        global_count,
        global_avg_sentiment_score: global_avg,
        camera,
    })
}

/// Review counts per sentiment label; null and blank labels share one bucket.
pub async fn sentiment_distribution(
    db: &Database,
    camera: Option<&str>,
) -> Result<SentimentDistribution, RevlensError> {
    let mut p = Predicates::new();
    p.eq("camera_model", camera);
    let unknown = p.bind(Value::Text(UNKNOWN_SENTIMENT.to_string()));
    // Labels are grouped as stored so every bucket matches an exact `sentiment` filter.
    let sql = format!(
        "SELECT CASE WHEN {} THEN sentiment_label ELSE {unknown} END AS label, COUNT(*) \
         FROM review {} GROUP BY label",
        not_blank("sentiment_label"),
        p.where_clause()
    );

    let rows = db
        .connection()
        .call(move |conn| -> Result<Vec<(String, i64)>, rusqlite::Error> {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params_from_iter(p.params()), |row| {
                    Ok((row.get(0)?, row.get(1)?))
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
        .map_err(map_tr_err)?;

    Ok(SentimentDistribution::from_buckets(
        rows.into_iter()
            .map(|(label, count)| (label, u64::try_from(count).unwrap_or(0))),
    ))
}

/// Distinct non-blank camera models, ascending.
pub async fn camera_models(db: &Database) -> Result<Vec<String>, RevlensError> {
    let sql = format!(
        "SELECT DISTINCT camera_model FROM review WHERE {} ORDER BY camera_model ASC",
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

/// Cameras with at least `min_count` scored reviews, best mean score first.
///
/// Ordering happens after rounding so two cameras whose reported averages
/// are equal fall back to camera name order.
pub async fn camera_ranking(db: &Database, min_count: u64) -> Result<Vec<CameraRank>, RevlensError> {
    let threshold = i64::try_from(min_count).unwrap_or(i64::MAX);
    let sql = format!(
        "SELECT camera_model, COUNT(*), AVG(sentiment_score) FROM review \
         WHERE {} AND sentiment_score IS NOT NULL \
         GROUP BY camera_model HAVING COUNT(*) >= ?1",
        not_blank("camera_model")
    );
    let rows = db
        .connection()
        .call(move |conn| -> Result<Vec<(String, i64, Option<f64>)>, rusqlite::Error> {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params![threshold], |row| {
                    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
        .map_err(map_tr_err)?;

    let mut ranking: Vec<CameraRank> = rows
        .into_iter()
        .map(|(camera, count, avg)| CameraRank {
            camera,
            count: u64::try_from(count).unwrap_or(0),
            avg_sentiment_score: round_average(avg),
        })
        .collect();
    ranking.sort_by(|a, b| {
        b.avg_sentiment_score
            .total_cmp(&a.avg_sentiment_score)
            .then_with(|| a.camera.cmp(&b.camera))
    });
    Ok(ranking)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{open_seeded, ReviewRow};

    fn scored(camera: Option<&str>, score: Option<f64>) -> ReviewRow {
        ReviewRow {
            camera_model: camera.map(str::to_string),
            sentiment_score: score,
            ..ReviewRow::default()
        }
    }

    #[tokio::test]
    async fn latest_returns_newest_twenty() {
        let rows: Vec<ReviewRow> = (0..25)
            .map(|i| ReviewRow {
                created_at: Some(format!("2026-01-{:02}T00:00:00", i + 1)),
                sentiment_label: Some(if i % 2 == 0 { "positive" } else { "negative" }.into()),
                ..ReviewRow::default()
            })
            .collect();
        let (_dir, db) = open_seeded(&rows, &[]).await;

        let all = latest(&db, None).await.unwrap();
        assert_eq!(all.len(), 20);
        assert_eq!(all[0].created_at.as_deref(), Some("2026-01-25T00:00:00"));
        assert!(all.windows(2).all(|w| w[0].created_at >= w[1].created_at));

        let negative = latest(&db, Some("negative")).await.unwrap();
        assert_eq!(negative.len(), 12);
        assert!(negative
            .iter()
            .all(|r| r.sentiment_label.as_deref() == Some("negative")));
    }

    #[tokio::test]
    async fn latest_breaks_timestamp_ties_by_id() {
        let rows = vec![
            ReviewRow {
                created_at: Some("2026-03-01T00:00:00".into()),
                ..ReviewRow::default()
            };
            3
        ];
        let (_dir, db) = open_seeded(&rows, &[]).await;
        let ids: Vec<i64> = latest(&db, None).await.unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn search_combines_filters() {
        let rows = vec![
            ReviewRow {
                camera_model: Some("X-T5".into()),
                sentiment_label: Some("positive".into()),
                content: Some("Autofocus is FAST".into()),
                ..ReviewRow::default()
            },
            ReviewRow {
                camera_model: Some("X-T5".into()),
                sentiment_label: Some("negative".into()),
                content: Some("slow autofocus".into()),
                ..ReviewRow::default()
            },
            ReviewRow {
                camera_model: Some("R6".into()),
                sentiment_label: Some("positive".into()),
                content: Some("great autofocus".into()),
                ..ReviewRow::default()
            },
        ];
        let (_dir, db) = open_seeded(&rows, &[]).await;

        let filter = ReviewFilter::new(Some("positive"), Some("X-T5"), Some("autofocus"));
        let page = search(&db, &filter, PageRequest::default()).await.unwrap();
        assert_eq!(page.total_elements, 1);
        assert_eq!(page.content[0].content.as_deref(), Some("Autofocus is FAST"));

        let text_only = ReviewFilter::new(None, None, Some("AUTOFOCUS"));
        let page = search(&db, &text_only, PageRequest::default()).await.unwrap();
        assert_eq!(page.total_elements, 3);
    }

    #[tokio::test]
    async fn search_paginates() {
        let rows: Vec<ReviewRow> = (0..45)
            .map(|i| ReviewRow {
                created_at: Some(format!("2026-02-01T00:{:02}:00", i)),
                ..ReviewRow::default()
            })
            .collect();
        let (_dir, db) = open_seeded(&rows, &[]).await;

        let page = search(&db, &ReviewFilter::default(), PageRequest::new(2, 20))
            .await
            .unwrap();
        assert_eq!(page.content.len(), 5);
        assert_eq!(page.total_elements, 45);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 2);

        let past_end = search(&db, &ReviewFilter::default(), PageRequest::new(9, 20))
            .await
            .unwrap();
        assert!(past_end.content.is_empty());
        assert_eq!(past_end.total_elements, 45);
    }

    #[tokio::test]
    async fn summary_scopes_to_camera() {
        let rows = vec![
            scored(Some("X"), Some(0.8)),
            scored(Some("X"), Some(0.6)),
            scored(Some("Y"), Some(0.9)),
        ];
        let (_dir, db) = open_seeded(&rows, &[]).await;

        let s = summary(&db, Some("X")).await.unwrap();
        assert_eq!(s.count, 2);
        assert_eq!(s.avg_sentiment_score, 0.7);
        assert_eq!(s.global_count, 3);
        assert_eq!(s.global_avg_sentiment_score, 0.767);
        assert_eq!(s.camera.as_deref(), Some("X"));

        let unfiltered = summary(&db, None).await.unwrap();
        assert_eq!(unfiltered.count, unfiltered.global_count);
        assert_eq!(
            unfiltered.avg_sentiment_score,
            unfiltered.global_avg_sentiment_score
        );
    }

    #[tokio::test]
    async fn summary_of_empty_store_is_zero() {
        let (_dir, db) = open_seeded(&[], &[]).await;
        let s = summary(&db, Some("nothing")).await.unwrap();
        assert_eq!(s.count, 0);
        assert_eq!(s.avg_sentiment_score, 0.0);
        assert_eq!(s.global_count, 0);
        assert_eq!(s.global_avg_sentiment_score, 0.0);
    }

    #[tokio::test]
    async fn summary_average_ignores_null_scores() {
        let rows = vec![scored(Some("X"), Some(0.5)), scored(Some("X"), None)];
        let (_dir, db) = open_seeded(&rows, &[]).await;
        let s = summary(&db, Some("X")).await.unwrap();
        assert_eq!(s.count, 2);
        assert_eq!(s.avg_sentiment_score, 0.5);
    }

    #[tokio::test]
    async fn distribution_buckets_missing_labels_as_unknown() {
        let label = |l: Option<&str>, cam: &str| ReviewRow {
            sentiment_label: l.map(str::to_string),
            camera_model: Some(cam.into()),
            ..ReviewRow::default()
        };
        let rows = vec![
            label(Some("positive"), "A"),
            label(Some("positive"), "A"),
            label(Some("negative"), "B"),
            label(None, "A"),
            label(Some("  "), "B"),
        ];
        let (_dir, db) = open_seeded(&rows, &[]).await;

        let all = sentiment_distribution(&db, None).await.unwrap();
        assert_eq!(all.total, 5);
        assert_eq!(all.buckets.get("positive"), Some(&2));
        assert_eq!(all.buckets.get("unknown"), Some(&2));
        assert_eq!(all.total, all.buckets.values().sum::<u64>());

        let a = sentiment_distribution(&db, Some("A")).await.unwrap();
        assert_eq!(a.total, 3);
        assert_eq!(a.buckets.get("negative"), None);

        let none = sentiment_distribution(&db, Some("Z")).await.unwrap();
        assert_eq!(none.total, 0);
        assert!(none.buckets.is_empty());
    }

    #[tokio::test]
    async fn camera_models_are_distinct_sorted_non_blank() {
        let rows = vec![
            scored(Some("B"), None),
            scored(Some(""), None),
            scored(Some("A"), None),
            scored(None, None),
            scored(Some("A"), None),
        ];
        let (_dir, db) = open_seeded(&rows, &[]).await;
        assert_eq!(camera_models(&db).await.unwrap(), vec!["A", "B"]);
    }

    #[tokio::test]
    async fn control_whitespace_counts_as_blank() {
        let row = |camera: &str, label: &str| ReviewRow {
            camera_model: Some(camera.into()),
            sentiment_label: Some(label.into()),
            sentiment_score: Some(0.5),
            ..ReviewRow::default()
        };
        let rows = vec![row("A", "positive"), row("\t", "\t"), row("\n", "\r\n")];
        let (_dir, db) = open_seeded(&rows, &[]).await;

        assert_eq!(camera_models(&db).await.unwrap(), vec!["A"]);
        let ranked = camera_ranking(&db, 0).await.unwrap();
        let names: Vec<&str> = ranked.iter().map(|r| r.camera.as_str()).collect();
        assert_eq!(names, vec!["A"]);

        let dist = sentiment_distribution(&db, None).await.unwrap();
        assert_eq!(dist.buckets.len(), 2);
        assert_eq!(dist.buckets.get("positive"), Some(&1));
        assert_eq!(dist.buckets.get("unknown"), Some(&2));
    }

    #[tokio::test]
    async fn distribution_labels_match_exact_filters() {
        let labelled = |l: &str| ReviewRow {
            sentiment_label: Some(l.into()),
            ..ReviewRow::default()
        };
        let rows = vec![labelled("positive"), labelled(" positive")];
        let (_dir, db) = open_seeded(&rows, &[]).await;

        let dist = sentiment_distribution(&db, None).await.unwrap();
        for (label, count) in &dist.buckets {
            let page = search(
                &db,
                &ReviewFilter {
                    sentiment: Some(label.clone()),
                    ..ReviewFilter::default()
                },
                PageRequest::default(),
            )
            .await
            .unwrap();
            assert_eq!(page.total_elements, *count, "{label:?}");
        }
        assert_eq!(dist.buckets.get("positive"), Some(&1));
    }

    #[tokio::test]
    async fn ranking_applies_threshold_and_order() {
        let mut rows = Vec::new();
        rows.extend((0..3).map(|_| scored(Some("A"), Some(0.5))));
        rows.extend((0..3).map(|_| scored(Some("B"), Some(0.9))));
        rows.extend((0..3).map(|_| scored(Some("C"), Some(0.5))));
        rows.push(scored(Some("D"), Some(1.0)));
        rows.push(scored(Some("D"), None));
        rows.push(scored(None, Some(1.0)));
        rows.push(scored(Some(" "), Some(1.0)));
        let (_dir, db) = open_seeded(&rows, &[]).await;

        let ranked = camera_ranking(&db, 3).await.unwrap();
        let names: Vec<&str> = ranked.iter().map(|r| r.camera.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
        assert!(ranked.iter().all(|r| r.count >= 3));

        let everything = camera_ranking(&db, 0).await.unwrap();
        assert_eq!(everything.len(), 4);
        assert_eq!(everything[0].camera, "D");
        assert_eq!(everything[0].count, 1);
        assert!(everything
            .windows(2)
            .all(|w| w[0].avg_sentiment_score >= w[1].avg_sentiment_score));
    }
}
