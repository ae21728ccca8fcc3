// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management: schema setup, PRAGMAs, and a fixed set of
//! read connections.
//!
//! Each `tokio_rusqlite::Connection` runs its closures on one background
//! thread, so a single connection serializes every query. Queries are spread
//! round-robin over `pool_size` connections instead. Every pooled connection
//! is `query_only`; the schema is created once on a separate setup
//! connection before the pool opens.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use revlens_config::model::StorageConfig;
use revlens_core::RevlensError;
use tokio_rusqlite::Connection;
use tracing::{debug, info};

use crate::migrations;

/// Convert tokio-rusqlite errors into [`RevlensError::Storage`].
pub fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> RevlensError {
    RevlensError::Storage {
        source: Box::new(e),
    }
}

/// Handle to the review database.
pub struct Database {
    connections: Vec<Connection>,
    next: AtomicUsize,
    path: String,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("path", &self.path)
            .field("connections", &self.connections.len())
            .finish()
    }
}

impl Database {
    /// Open the database at `config.database_path`, creating missing tables,
    /// then open `config.pool_size` read-only connections.
    pub async fn open(config: &StorageConfig) -> Result<Self, RevlensError> {
        let path = config.database_path.clone();
        let wal_mode = config.wal_mode;

        let setup_path = path.clone();
        tokio::task::spawn_blocking(move || prepare_schema(&setup_path, wal_mode))
            .await
            .map_err(|e| RevlensError::Internal(format!("schema setup task failed: {e}")))??;

        let busy_timeout = Duration::from_millis(config.busy_timeout_ms);
        let pool_size = config.pool_size.max(1);
        let mut connections = Vec::with_capacity(pool_size);
        for _ in 0..pool_size {
            let conn = Connection::open(&path)
                .await
                .map_err(|e| RevlensError::Storage {
                    source: Box::new(e),
                })?;
            conn.call(move |conn| -> Result<(), rusqlite::Error> {
                conn.busy_timeout(busy_timeout)?;
                conn.pragma_update(None, "query_only", true)?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
            connections.push(conn);
        }

        info!(path = %path, pool_size, wal_mode, "review database opened");
        Ok(Self {
            connections,
            next: AtomicUsize::new(0),
            path,
        })
    }

    /// The next connection in round-robin order.
    pub fn connection(&self) -> &Connection {
        let idx = self.next.fetch_add(1, Ordering::Relaxed) % self.connections.len();
        &self.connections[idx]
    }

    /// Path the database was opened from.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Number of pooled connections.
    pub fn pool_size(&self) -> usize {
        self.connections.len()
    }

    /// Close every pooled connection.
    pub async fn close(&self) -> Result<(), RevlensError> {
        for conn in &self.connections {
            conn.clone().close().await.map_err(map_tr_err)?;
        }
        debug!(path = %self.path, "review database closed");
        Ok(())
    }
}

/// Apply journal mode and migrations on a short-lived writable connection.
fn prepare_schema(path: &str, wal_mode: bool) -> Result<(), RevlensError> {
    let storage_err = |e: rusqlite::Error| RevlensError::Storage {
        source: Box::new(e),
    };

    let mut conn = rusqlite::Connection::open(path).map_err(storage_err)?;
    if wal_mode {
        let mode: String = conn
            .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
            .map_err(storage_err)?;
        debug!(journal_mode = %mode, "journal mode set");
    }
    migrations::run_migrations(&mut conn)
}
