//! JSON envelope for the `/api/v1` routes.
//!
//! Refreshes come back as `{ "data": ..., "meta": ... }`. Control text the
//! node cannot interpret comes back as [`ApiError`], rendered as
//! `{ "error": ..., "meta": ... }` with the offending query field named.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::types::ControlParseError;

/// API version reported in every envelope.
pub const API_VERSION: &str = "1";

/// Stamp attached to every envelope.
#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub timestamp: String,
    pub version: &'static str,
}

impl ResponseMeta {
    fn now() -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            version: API_VERSION,
        }
    }
}

/// `{ "data": T, "meta": { ... } }`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Response {
        let body = Self {
            data,
            meta: ResponseMeta::now(),
        };
        (StatusCode::OK, axum::Json(body)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    /// Query or path parameter that failed to parse
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorDetail,
    meta: ResponseMeta,
}

/// Rejected refresh request.
///
/// An unknown sensor names a resource that does not exist (404); every
/// other unreadable control is a malformed request (400).
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] ControlParseError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            ControlParseError::Sensor(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    pub fn field(&self) -> &'static str {
        match self.0 {
            ControlParseError::AutoMode(_) => "mode",
            ControlParseError::Override(_) | ControlParseError::Severity(_) => "override",
            ControlParseError::Sensor(_) => "kind",
            ControlParseError::Trigger(_) => "trigger",
        }
    }

    fn code(&self) -> &'static str {
        match self.status() {
            StatusCode::NOT_FOUND => "NOT_FOUND",
            _ => "BAD_REQUEST",
        }
    }

    fn detail(&self) -> ErrorDetail {
        ErrorDetail {
            code: self.code(),
            field: self.field(),
            message: self.0.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!(field = self.field(), error = %self.0, "Rejected refresh controls");
        let body = ErrorBody {
            error: self.detail(),
            meta: ResponseMeta::now(),
        };
        (self.status(), axum::Json(body)).into_response()
    }
}
