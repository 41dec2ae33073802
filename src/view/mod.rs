//! Refresh rendering
//!
//! One refresh is an explicit function from inputs to a [`ViewModel`]:
//!
//! ```text
//! controls + now + rng ──► decide severity ──► synthesize waveforms
//!                                          └─► classify ──► LEDs + alert
//! ```
//!
//! Nothing is carried between refreshes. The HTML page and the JSON API
//! are both projections of the same `ViewModel`.

pub mod html;
pub mod plot;
pub mod status;

pub use status::{LedColor, StatusLeds};

use chrono::{DateTime, TimeZone};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::classifier::{classify, Classification};
use crate::config::defaults::WAVEFORM_SAMPLES;
use crate::decision::{Decision, SeverityPolicy};
use crate::synthesis::{synthesize_all, Waveform, WaveformSummary};
use crate::types::{AlertRecord, Controls, NodeInfo, SensorKind, TEMPERATURE_NOTE};

/// Banner shown whenever the node reports a crack.
pub const MOCK_ALERT_NOTICE: &str = "Mock Alert sent: Dashboard + SMS/Email notification";

/// Footer caption under the dashboard.
pub const CAPTION: &str = "Trigger a manual event or use Auto mode to simulate realistic sensor \
bursts for AE, Accel, and GW-UT sensors.";

/// One plotted channel plus its summary statistics.
#[derive(Debug, Clone, Serialize)]
pub struct WaveformPanel {
    pub title: String,
    pub summary: WaveformSummary,
    #[serde(flatten)]
    pub waveform: Waveform,
}

impl From<Waveform> for WaveformPanel {
    fn from(waveform: Waveform) -> Self {
        Self {
            title: waveform.title(),
            summary: waveform.summary(),
            waveform,
        }
    }
}

/// Everything the dashboard shows for one refresh.
#[derive(Debug, Clone, Serialize)]
pub struct ViewModel {
    pub node: NodeInfo,
    pub sensor_notes: Vec<&'static str>,
    pub controls: Controls,
    /// Window the periodic mode was evaluated against
    pub periodic_window_secs: u64,
    pub decision: Decision,
    pub waveforms: Vec<WaveformPanel>,
    pub classification: Classification,
    pub leds: StatusLeds,
    pub alert: AlertRecord,
    /// Present when the node would have raised an alert
    pub alert_notice: Option<&'static str>,
}

impl ViewModel {
    pub fn severity(&self) -> crate::types::SeverityLabel {
        self.decision.severity
    }

    pub fn waveform(&self, kind: SensorKind) -> Option<&WaveformPanel> {
        self.waveforms.iter().find(|p| p.waveform.kind == kind)
    }
}

/// Sensor notes in panel order.
pub fn sensor_notes() -> Vec<&'static str> {
    SensorKind::ALL
        .iter()
        .map(SensorKind::note)
        .chain(std::iter::once(TEMPERATURE_NOTE))
        .collect()
}

/// Run one refresh.
pub fn render<Tz, R>(
    node: &NodeInfo,
    policy: &SeverityPolicy,
    controls: &Controls,
    now: &DateTime<Tz>,
    rng: &mut R,
) -> ViewModel
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
    R: Rng + ?Sized,
{
    let decision = policy.evaluate(controls, now, rng);
    let severity = decision.severity;

    let waveforms: Vec<WaveformPanel> = synthesize_all(severity, rng)
        .into_iter()
        .map(WaveformPanel::from)
        .collect();
    let sample_count = waveforms
        .first()
        .map_or(WAVEFORM_SAMPLES, |p| p.waveform.len());

    let classification = classify(severity, rng);
    let leds = StatusLeds::for_severity(severity);
    let alert = AlertRecord::new(node, severity, classification.confidence, now, sample_count);

    debug!(
        mode = controls.auto_mode.slug(),
        severity_override = controls.severity_override.slug(),
        triggered = controls.triggered,
        severity = %severity,
        reason = decision.reason.description(),
        "Refresh rendered"
    );

    let alert_notice = if severity.is_crack() {
        info!(
            node = %node.id,
            severity = %severity,
            confidence = classification.confidence,
            "Mock alert raised"
        );
        Some(MOCK_ALERT_NOTICE)
    } else {
        None
    };

    ViewModel {
        node: node.clone(),
        sensor_notes: sensor_notes(),
        controls: *controls,
        periodic_window_secs: policy.periodic_window_secs(),
        decision,
        waveforms,
        classification,
        leds,
        alert,
        alert_notice,
    }
}

/// Escape text for inclusion in HTML body or attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
