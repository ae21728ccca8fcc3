// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite read layer for the Revlens review service.
//!
//! Opens the review database in WAL mode, applies the embedded schema, and
//! answers every review and keyword query over a small set of `query_only`
//! connections driven by `tokio-rusqlite`.

pub mod adapter;
pub mod database;
mod filter;
pub mod migrations;
pub mod queries;

#[cfg(test)]
pub(crate) mod test_support;

pub use adapter::SqliteStorage;
pub use database::Database;
