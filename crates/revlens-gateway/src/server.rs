// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the review API.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::routing::get;
use axum::Router;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use revlens_core::{KeywordStatStore, ReviewStore, RevlensError};

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    pub reviews: Arc<dyn ReviewStore>,
    pub keywords: Arc<dyn KeywordStatStore>,
    /// Upper bound on a single store call.
    pub request_timeout: Duration,
    /// Process start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        reviews: Arc<dyn ReviewStore>,
        keywords: Arc<dyn KeywordStatStore>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            reviews,
            keywords,
            request_timeout,
            start_time: Instant::now(),
        }
    }
}

/// Server settings (mirrors `ServerConfig` from `revlens-config` so this
/// crate does not depend on the config loader).
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Attach a permissive CORS layer.
    pub cors_permissive: bool,
}

/// Build the API router.
pub fn router(state: AppState, cors_permissive: bool) -> Router {
    let api = Router::new()
        .route("/health", get(handlers::get_health))
        .route("/reviews", get(handlers::get_latest))
        .route("/reviews/search", get(handlers::get_search))
        .route("/cameras", get(handlers::get_cameras))
        .route("/stats/summary", get(handlers::get_summary))
        .route("/stats/sentiment", get(handlers::get_sentiment_distribution))
        .route("/stats/ranking", get(handlers::get_ranking))
        .route("/stats/keywords", get(handlers::get_keywords))
        .route("/stats/keywords/cameras", get(handlers::get_keyword_cameras));

    let app = Router::new()
        .nest("/api", api)
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if cors_permissive {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

/// Bind and serve until `shutdown` is cancelled.
pub async fn start_server(
    config: &GatewayConfig,
    state: AppState,
    shutdown: CancellationToken,
) -> Result<(), RevlensError> {
    let app = router(state, config.cors_permissive);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| RevlensError::Internal(format!("failed to bind {addr}: {e}")))?;

    tracing::info!("review API listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| RevlensError::Internal(format!("server error: {e}")))?;

    tracing::info!("review API stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_config_debug() {
        let config = GatewayConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            cors_permissive: true,
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("127.0.0.1"));
    }
}
