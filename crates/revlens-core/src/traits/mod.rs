// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter and store trait definitions.
//!
//! All traits extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod keywords;
pub mod reviews;
pub mod storage;

pub use adapter::PluginAdapter;
pub use keywords::KeywordStatStore;
pub use reviews::ReviewStore;
pub use storage::StorageAdapter;
