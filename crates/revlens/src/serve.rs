// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `revlens serve` command implementation.
//!
//! Opens the review database, builds the API state, and serves HTTP until a
//! shutdown signal arrives.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use revlens_config::RevlensConfig;
use revlens_core::{PluginAdapter, RevlensError, StorageAdapter};
use revlens_gateway::{AppState, GatewayConfig};
use revlens_storage::SqliteStorage;

use crate::shutdown;

/// Run the API server until SIGINT/SIGTERM.
pub async fn run_serve(config: RevlensConfig) -> Result<(), RevlensError> {
    init_tracing(&config.log.level);

    ensure_parent_dir(&config.storage.database_path)?;

    let storage = Arc::new(SqliteStorage::new(config.storage.clone()));
    storage.initialize().await?;
    info!(
        path = %config.storage.database_path,
        pool_size = config.storage.pool_size,
        "storage ready"
    );

    let state = AppState::new(
        storage.clone(),
        storage.clone(),
        Duration::from_secs(config.server.request_timeout_secs),
    );
    let gateway_config = GatewayConfig {
        host: config.server.bind_address.clone(),
        port: config.server.port,
        cors_permissive: config.server.cors_permissive,
    };

    let cancel = shutdown::install_signal_handler();
    let served = revlens_gateway::start_server(&gateway_config, state, cancel).await;

    if let Err(e) = storage.shutdown().await {
        warn!(error = %e, "storage shutdown failed");
    }
    served?;

    info!("revlens serve shutdown complete");
    Ok(())
}

/// SQLite creates the database file but not its directory.
fn ensure_parent_dir(database_path: &str) -> Result<(), RevlensError> {
    match Path::new(database_path).parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            std::fs::create_dir_all(dir).map_err(|e| RevlensError::Storage {
                source: Box::new(e),
            })
        }
        _ => Ok(()),
    }
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let level = log_level.to_ascii_lowercase();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("revlens={level},tower_http={level},warn"))
    });

    // A second init in the same process (tests) is not an error worth failing on.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_parent_dir_creates_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("a").join("b").join("reviews.db");
        ensure_parent_dir(db.to_str().unwrap()).unwrap();
        assert!(dir.path().join("a").join("b").is_dir());
    }

    #[test]
    fn ensure_parent_dir_accepts_bare_file_name() {
        ensure_parent_dir("reviews.db").unwrap();
    }
}
