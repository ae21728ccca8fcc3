// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed read queries, one module per table.

pub mod keyword_stats;
pub mod reviews;
