//! REST API module using Axum
//!
//! Serves the virtual node dashboard:
//! - `/` rendered HTML view, driven by query-string controls
//! - `/health` liveness check
//! - `/api/v1/*` JSON endpoints with a consistent envelope, never cached

pub mod envelope;
pub mod handlers;
pub mod middleware;
mod routes;

pub use handlers::DashboardState;

use axum::http::{header, Method};
use axum::middleware as axum_mw;
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::defaults::CORS_ENV_VAR;

/// Build a CORS layer that is restrictive by default (same-origin only).
///
/// Set `SMARTTRACK_CORS_ORIGINS` to a comma-separated list of allowed
/// origins to let another dashboard poll the API.
fn build_cors_layer() -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    match std::env::var(CORS_ENV_VAR) {
        Ok(origins) => {
            let allowed: Vec<_> = origins
                .split(',')
                .filter_map(|o| o.trim().parse().ok())
                .collect();
            tracing::info!(origins = %origins, "CORS: allowing configured origins");
            base.allow_origin(allowed)
        }
        Err(_) => base,
    }
}

/// Create the complete application router.
pub fn create_app(state: DashboardState) -> Router {
    let cors = build_cors_layer();

    Router::new()
        .nest(
            "/api/v1",
            routes::api_routes(state.clone()).layer(axum_mw::from_fn(middleware::no_store)),
        )
        .merge(routes::page_routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}
