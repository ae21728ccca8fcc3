// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only HTTP API over the review and keyword stores.
//!
//! Every route is a `GET` returning JSON. Handlers normalize their query
//! parameters, call one store method under a timeout, and map failures to
//! a small JSON error body.

pub mod error;
pub mod handlers;
pub mod server;

pub use error::ApiError;
pub use server::{router, start_server, AppState, GatewayConfig};
