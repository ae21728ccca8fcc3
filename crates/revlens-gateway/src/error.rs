// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mapping from service errors to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use revlens_core::RevlensError;

/// Error response body: `{"error": {"code": .., "message": ..}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiError {
    pub code: u16,
    pub message: String,
}

impl ApiError {
    pub fn not_found(path: &str) -> Self {
        Self {
            code: StatusCode::NOT_FOUND.as_u16(),
            message: format!("no route for {path}"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = Json(serde_json::json!({
            "error": {
                "code": self.code,
                "message": self.message,
            }
        }));
        (status, body).into_response()
    }
}

impl From<RevlensError> for ApiError {
    // The cause stays in the log; clients only see a generic message.
    fn from(err: RevlensError) -> Self {
        match err {
            RevlensError::Timeout { duration } => {
                tracing::warn!(?duration, "query timed out");
                ApiError {
                    code: StatusCode::GATEWAY_TIMEOUT.as_u16(),
                    message: "query timed out".to_string(),
                }
            }
            RevlensError::Storage { .. } | RevlensError::HealthCheckFailed { .. } => {
                tracing::error!(error = %err, "storage failure");
                ApiError {
                    code: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                    message: "storage unavailable".to_string(),
                }
            }
            other => {
                tracing::error!(error = %other, "internal failure");
                ApiError {
                    code: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                    message: "internal server error".to_string(),
                }
            }
        }
    }
}
