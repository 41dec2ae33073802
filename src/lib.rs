//! SmartTrack: Virtual Hardware Node
//!
//! Simulation prototype of a railway structural-health-monitoring anchor
//! node. Each refresh decides a crack severity, synthesizes three sensor
//! waveforms for it, runs a mock classifier and builds the alert the node
//! would report.
//!
//! ## Architecture
//!
//! - **Synthesis**: deterministic base signal + severity pulse + Gaussian noise
//! - **Decision**: override / auto-mode / trigger rules against wall-clock time
//! - **Classifier**: label echo with a per-label confidence range
//! - **View**: LEDs, alert payload, HTML page and JSON view model
//! - **API**: axum server exposing the view and its parts

pub mod api;
pub mod classifier;
pub mod config;
pub mod decision;
pub mod synthesis;
pub mod types;
pub mod view;

// Re-export configuration
pub use config::NodeConfig;

// Re-export commonly used types
pub use types::{
    AlertRecord, AutoMode, ControlParseError, Controls, NodeInfo, SensorKind, SeverityLabel,
    SeverityOverride,
};

pub use classifier::{classify, Classification};
pub use decision::{decide, Decision, DecisionReason, SeverityPolicy};
pub use synthesis::{synthesize, synthesize_all, Waveform, WaveformSummary};
pub use view::{render, StatusLeds, ViewModel};
