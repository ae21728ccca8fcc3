// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedded schema migrations using refinery.
//!
//! The review tables are populated by the ingestion pipeline, which may have
//! created them already; every statement in `migrations/` is idempotent so the
//! runner can be applied to a pipeline-owned database as well as a fresh file.

use revlens_core::RevlensError;
use tracing::info;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Run all pending migrations against the given connection.
///
/// Refinery records applied versions in `refinery_schema_history`.
pub fn run_migrations(conn: &mut rusqlite::Connection) -> Result<(), RevlensError> {
    let report = embedded::migrations::runner()
        .run(conn)
        .map_err(|e| RevlensError::Storage {
            source: Box::new(e),
        })?;
    let applied = report.applied_migrations();
    if !applied.is_empty() {
        info!(count = applied.len(), "applied schema migrations");
    }
    Ok(())
}
