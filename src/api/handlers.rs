//! API handlers for the virtual node dashboard
//!
//! Every handler runs an independent refresh: it reads the clock, seeds a
//! fresh RNG and renders a new [`ViewModel`]. Nothing is shared between
//! requests except the immutable node configuration.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Local};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use super::envelope::{ApiError, ApiResponse};
use crate::config::NodeConfig;
use crate::decision::{Decision, SeverityPolicy};
use crate::synthesis::synthesize;
use crate::types::{
    parse_trigger, AutoMode, ControlParseError, Controls, NodeInfo, SensorKind, SeverityOverride,
};
use crate::view::{self, html, sensor_notes, ViewModel, WaveformPanel};

/// Source of "now" for each refresh.
pub type Clock = Arc<dyn Fn() -> DateTime<Local> + Send + Sync>;

/// Shared state for API handlers
#[derive(Clone)]
pub struct DashboardState {
    /// Effective node configuration
    pub config: Arc<NodeConfig>,
    policy: SeverityPolicy,
    clock: Clock,
    /// Fixed seed for every refresh; `None` draws from OS entropy
    seed: Option<u64>,
}

impl DashboardState {
    pub fn new(config: NodeConfig) -> Self {
        Self {
            policy: config.policy(),
            config: Arc::new(config),
            clock: Arc::new(Local::now),
            seed: None,
        }
    }

    /// Replace the wall clock, e.g. to pin the periodic window in tests.
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Local> + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Seed every refresh identically, making responses reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn policy(&self) -> &SeverityPolicy {
        &self.policy
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    fn now(&self) -> DateTime<Local> {
        (self.clock)()
    }

    /// Run one refresh with the given controls.
    pub fn refresh(&self, controls: &Controls) -> ViewModel {
        let now = self.now();
        let mut rng = self.rng();
        view::render(&self.config.node, &self.policy, controls, &now, &mut rng)
    }
}

// ============================================================================
// Query parsing
// ============================================================================

/// Dashboard controls as they arrive in the query string.
///
/// Every field is optional; missing controls take their defaults
/// (idle, auto, not triggered).
#[derive(Debug, Default, Deserialize)]
pub struct RefreshQuery {
    pub mode: Option<String>,
    #[serde(rename = "override")]
    pub severity_override: Option<String>,
    pub trigger: Option<String>,
}

impl RefreshQuery {
    pub fn controls(&self) -> Result<Controls, ControlParseError> {
        let auto_mode = match self.mode.as_deref() {
            Some(s) if !s.trim().is_empty() => s.parse::<AutoMode>()?,
            _ => AutoMode::default(),
        };
        let severity_override = match self.severity_override.as_deref() {
            Some(s) if !s.trim().is_empty() => s.parse::<SeverityOverride>()?,
            _ => SeverityOverride::default(),
        };
        let triggered = match self.trigger.as_deref() {
            Some(s) => parse_trigger(s)?,
            None => false,
        };
        Ok(Controls::new(auto_mode, severity_override, triggered))
    }
}

// ============================================================================
// Response types
// ============================================================================

/// One waveform plus the decision it was synthesized for.
#[derive(Debug, Serialize)]
pub struct WaveformResponse {
    pub decision: Decision,
    pub panel: WaveformPanel,
}

/// Static description of a sensor channel.
#[derive(Debug, Serialize)]
pub struct SensorDescriptor {
    pub kind: SensorKind,
    pub code: &'static str,
    pub slug: &'static str,
    pub title: &'static str,
    pub note: &'static str,
}

impl From<SensorKind> for SensorDescriptor {
    fn from(kind: SensorKind) -> Self {
        Self {
            kind,
            code: kind.code(),
            slug: kind.slug(),
            title: kind.plot_title(),
            note: kind.note(),
        }
    }
}

/// Node metadata for `/api/v1/node`.
#[derive(Debug, Serialize)]
pub struct NodeResponse {
    pub node: NodeInfo,
    pub sensors: Vec<SensorDescriptor>,
    pub sensor_notes: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET / - Rendered two-pane dashboard
pub async fn get_dashboard(
    State(state): State<DashboardState>,
    Query(query): Query<RefreshQuery>,
) -> Response {
    match query.controls() {
        Ok(controls) => {
            let view = state.refresh(&controls);
            Html(html::render_page(&view, state.config.simulation.auto_refresh_secs)).into_response()
        }
        Err(e) => {
            warn!(error = %e, "Rejected dashboard controls");
            (StatusCode::BAD_REQUEST, Html(view::escape_html(&e.to_string()))).into_response()
        }
    }
}

/// GET /api/v1/refresh - Full view model for one refresh
pub async fn get_refresh(
    State(state): State<DashboardState>,
    Query(query): Query<RefreshQuery>,
) -> Result<Response, ApiError> {
    let controls = query.controls()?;
    Ok(ApiResponse::ok(state.refresh(&controls)))
}

/// POST /api/v1/trigger - Refresh with the manual trigger pressed
pub async fn post_trigger(
    State(state): State<DashboardState>,
    Query(query): Query<RefreshQuery>,
) -> Result<Response, ApiError> {
    let controls = query.controls()?.with_trigger();
    Ok(ApiResponse::ok(state.refresh(&controls)))
}

/// GET /api/v1/alert - Bare alert payload, as a downstream consumer sees it
pub async fn get_alert(
    State(state): State<DashboardState>,
    Query(query): Query<RefreshQuery>,
) -> Result<Response, ApiError> {
    let controls = query.controls()?;
    Ok(Json(state.refresh(&controls).alert).into_response())
}

/// GET /api/v1/waveforms/:kind - One synthesized channel
pub async fn get_waveform(
    State(state): State<DashboardState>,
    Path(kind): Path<String>,
    Query(query): Query<RefreshQuery>,
) -> Result<Response, ApiError> {
    let kind = kind.parse::<SensorKind>()?;
    let controls = query.controls()?;

    let now = state.now();
    let mut rng = state.rng();
    let decision = state.policy.evaluate(&controls, &now, &mut rng);
    let panel = WaveformPanel::from(synthesize(kind, decision.severity, &mut rng));

    Ok(ApiResponse::ok(WaveformResponse { decision, panel }))
}

/// GET /api/v1/node - Node identity and sensor descriptions
pub async fn get_node(State(state): State<DashboardState>) -> Response {
    ApiResponse::ok(NodeResponse {
        node: state.config.node.clone(),
        sensors: SensorKind::ALL.into_iter().map(SensorDescriptor::from).collect(),
        sensor_notes: sensor_notes(),
    })
}

/// GET /api/v1/config - Effective configuration
pub async fn get_config(State(state): State<DashboardState>) -> Response {
    ApiResponse::ok(state.config.as_ref())
}

/// GET /health - Liveness check
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
