// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Revlens integration tests.
//!
//! # Components
//!
//! - [`TestHarness`] - temp SQLite database, fixture seeding, and the API router
//! - [`fixtures`] - review and keyword-stat rows plus a small sample dataset

pub mod fixtures;
pub mod harness;

pub use fixtures::{KeywordStatFixture, ReviewFixture};
pub use harness::{TestHarness, TestHarnessBuilder};
