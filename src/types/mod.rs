//! Shared data structures for the virtual anchor node
//!
//! This module defines the closed vocabularies every refresh is built from:
//! - SeverityLabel / SeverityOverride / AutoMode (decision inputs and output)
//! - SensorKind (selects the synthesized waveform model)
//! - AlertRecord / NodeInfo (what the node reports about itself)
//! - Controls (the three operator inputs consumed by one refresh)

mod alert;
mod controls;
mod sensor;
mod severity;

pub use alert::*;
pub use controls::*;
pub use sensor::*;
pub use severity::*;

use thiserror::Error;

/// Failure to interpret operator-supplied control text.
///
/// Raised by the `FromStr` impls of the control enums when a query string
/// or CLI flag names something outside the closed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlParseError {
    #[error("unknown auto mode '{0}' (expected idle, periodic or manual-only)")]
    AutoMode(String),

    #[error("unknown severity override '{0}' (expected auto, no-crack, minor, major or critical)")]
    Override(String),

    #[error("unknown severity label '{0}' (expected no-crack, minor, major or critical)")]
    Severity(String),

    #[error("unknown sensor kind '{0}' (expected ae, accel or gw)")]
    Sensor(String),

    #[error("invalid trigger '{0}' (expected true/false, 1/0, on/off or yes/no)")]
    Trigger(String),
}

/// Normalise free-form control text: lowercase, with spaces and
/// underscores folded into hyphens.
pub(crate) fn normalize_token(s: &str) -> String {
    s.trim()
        .to_ascii_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '_' { '-' } else { c })
        .collect()
}
