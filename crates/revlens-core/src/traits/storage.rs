// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter trait for persistence backends (SQLite, etc.).

use async_trait::async_trait;

use crate::error::RevlensError;
use crate::traits::adapter::PluginAdapter;

/// Adapter for storage and persistence backends.
///
/// Storage adapters own the lifecycle of database connections. The query
/// traits ([`ReviewStore`](crate::ReviewStore),
/// [`KeywordStatStore`](crate::KeywordStatStore)) are only usable after
/// [`initialize`](StorageAdapter::initialize) has succeeded.
#[async_trait]
pub trait StorageAdapter: PluginAdapter {
    /// Initializes the storage backend (migrations, connections).
    async fn initialize(&self) -> Result<(), RevlensError>;

    /// Closes the storage backend and releases connections.
    async fn close(&self) -> Result<(), RevlensError>;
}
