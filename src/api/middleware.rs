//! API middleware layers.
//!
//! Every refresh is a fresh computation, so API responses must never be
//! served from a cache.

use axum::http::header::CACHE_CONTROL;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;

/// Axum middleware that marks responses `Cache-Control: no-store`.
pub async fn no_store(request: axum::extract::Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}
