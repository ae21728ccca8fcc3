// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `revlens doctor` command implementation.
//!
//! Runs diagnostic checks against the configuration and the review database.
//! The database is opened read-only, so running doctor never creates or
//! migrates anything.

use std::io::IsTerminal;
use std::path::Path;
use std::time::{Duration, Instant};

use rusqlite::OpenFlags;

use revlens_config::RevlensConfig;

/// Tables the ingestion pipeline is expected to populate.
const REQUIRED_TABLES: [&str; 2] = ["review", "review_keyword_stats"];

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

impl CheckResult {
    fn new(name: &str, status: CheckStatus, message: impl Into<String>, start: Instant) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: message.into(),
            duration: start.elapsed(),
        }
    }
}

/// Run every check, print the report, and return the number of failures.
pub async fn run_doctor(config_path: Option<&Path>, plain: bool) -> usize {
    let use_color = !plain && std::io::stdout().is_terminal();
    let mut results = Vec::new();

    let (config_check, config) = check_config(config_path);
    results.push(config_check);
    if let Some(config) = config {
        results.extend(check_database(&config.storage.database_path).await);
    }

    print_report(&results, use_color);
    results
        .iter()
        .filter(|r| r.status == CheckStatus::Fail)
        .count()
}

fn print_report(results: &[CheckResult], use_color: bool) {
    use colored::Colorize;

    println!();
    println!("  revlens doctor");
    println!("  {}", "-".repeat(50));

    let mut issues = 0;
    for result in results {
        let duration_ms = result.duration.as_millis();
        let (tag, message) = match result.status {
            CheckStatus::Pass => ("[OK]  ", result.message.normal()),
            CheckStatus::Warn => {
                issues += 1;
                ("[WARN]", result.message.yellow())
            }
            CheckStatus::Fail => {
                issues += 1;
                ("[FAIL]", result.message.red())
            }
        };
        if use_color {
            let tag = match result.status {
                CheckStatus::Pass => tag.green(),
                CheckStatus::Warn => tag.yellow(),
                CheckStatus::Fail => tag.red(),
            };
            println!("    {tag} {:<24} {message} ({duration_ms}ms)", result.name);
        } else {
            println!(
                "    {tag} {:<24} {} ({duration_ms}ms)",
                result.name, result.message
            );
        }
    }

    println!();
    if issues > 0 {
        let issue_word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {issue_word} found.");
    } else {
        println!("  All checks passed.");
    }
    println!();
}

/// Check configuration loads and validates.
fn check_config(path: Option<&Path>) -> (CheckResult, Option<RevlensConfig>) {
    let start = Instant::now();
    let loaded = match path {
        Some(p) => revlens_config::load_and_validate_path(p),
        None => revlens_config::load_and_validate(),
    };
    match loaded {
        Ok(config) => (
            CheckResult::new("Configuration", CheckStatus::Pass, "valid", start),
            Some(config),
        ),
        Err(errors) => {
            revlens_config::render_errors(&errors);
            (
                CheckResult::new(
                    "Configuration",
                    CheckStatus::Fail,
                    format!("{} error(s)", errors.len()),
                    start,
                ),
                None,
            )
        }
    }
}

/// Check the database file, its connectivity, and the expected tables.
async fn check_database(db_path: &str) -> Vec<CheckResult> {
    let start = Instant::now();

    if !Path::new(db_path).exists() {
        return vec![CheckResult::new(
            "Database",
            CheckStatus::Warn,
            format!("not found: {db_path} (created empty on first serve)"),
            start,
        )];
    }

    let conn = match tokio_rusqlite::Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .await
    {
        Ok(conn) => conn,
        Err(e) => {
            return vec![CheckResult::new(
                "Database",
                CheckStatus::Fail,
                format!("open failed: {e}"),
                start,
            )];
        }
    };

    let counts = conn
        .call(|conn| -> Result<Vec<(&'static str, Option<i64>)>, rusqlite::Error> {
            conn.query_row("SELECT 1", [], |_| Ok(()))?;
            let mut counts = Vec::with_capacity(REQUIRED_TABLES.len());
            for table in REQUIRED_TABLES {
                let exists: bool = conn.query_row(
                    "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
                    [table],
                    |row| row.get(0),
                )?;
                let count = if exists {
                    Some(conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                        row.get(0)
                    })?)
                } else {
                    None
                };
                counts.push((table, count));
            }
            Ok(counts)
        })
        .await;

    let counts = match counts {
        Ok(counts) => counts,
        Err(e) => {
            return vec![CheckResult::new(
                "Database",
                CheckStatus::Fail,
                format!("query failed: {e}"),
                start,
            )];
        }
    };

    let mut results = vec![CheckResult::new(
        "Database",
        CheckStatus::Pass,
        "connected",
        start,
    )];
    for (table, count) in counts {
        let name = format!("Table {table}");
        let result = match count {
            Some(0) => CheckResult::new(&name, CheckStatus::Warn, "empty", start),
            Some(n) => CheckResult::new(&name, CheckStatus::Pass, format!("{n} rows"), start),
            None => CheckResult::new(&name, CheckStatus::Fail, "missing", start),
        };
        results.push(result);
    }
    results
}
