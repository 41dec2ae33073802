//! API route definitions
//!
//! - /api/v1/refresh - One full refresh (view model)
//! - /api/v1/trigger - Refresh with the manual trigger pressed
//! - /api/v1/alert - Alert payload only
//! - /api/v1/waveforms/:kind - One sensor channel (ae, accel, gw)
//! - /api/v1/node - Node metadata and sensor notes
//! - /api/v1/config - Effective configuration

use axum::{routing::{get, post}, Router};

use super::handlers::{self, DashboardState};

/// Create all API routes for the dashboard
pub fn api_routes(state: DashboardState) -> Router {
    Router::new()
        .route("/refresh", get(handlers::get_refresh))
        .route("/trigger", post(handlers::post_trigger))
        .route("/alert", get(handlers::get_alert))
        .route("/waveforms/:kind", get(handlers::get_waveform))
        .route("/node", get(handlers::get_node))
        .route("/config", get(handlers::get_config))
        .with_state(state)
}

/// HTML dashboard and health check at root level
pub fn page_routes(state: DashboardState) -> Router {
    Router::new()
        .route("/", get(handlers::get_dashboard))
        .route("/health", get(handlers::health_check))
        .with_state(state)
}
