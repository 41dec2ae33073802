//! Severity vocabulary: the decided label, the operator override, and the
//! auto-mode selector.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{normalize_token, ControlParseError};

// ============================================================================
// Severity Label
// ============================================================================

/// Mock crack severity decided once per refresh.
///
/// Drives pulse amplitude in every synthesized waveform, the classifier's
/// confidence range, and which status LED is lit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Hash, PartialOrd, Ord)]
pub enum SeverityLabel {
    #[default]
    #[serde(rename = "No Crack")]
    NoCrack,
    Minor,
    Major,
    Critical,
}

impl SeverityLabel {
    /// Every label, ordered from healthy to worst.
    pub const ALL: [Self; 4] = [Self::NoCrack, Self::Minor, Self::Major, Self::Critical];

    /// The labels a simulated crack event can produce.
    pub const CRACK_EVENTS: [Self; 3] = [Self::Minor, Self::Major, Self::Critical];

    /// Display name used in plots, the alert payload and the classifier box
    pub fn display_name(&self) -> &'static str {
        match self {
            SeverityLabel::NoCrack => "No Crack",
            SeverityLabel::Minor => "Minor",
            SeverityLabel::Major => "Major",
            SeverityLabel::Critical => "Critical",
        }
    }

    /// URL/CLI slug
    pub fn slug(&self) -> &'static str {
        match self {
            SeverityLabel::NoCrack => "no-crack",
            SeverityLabel::Minor => "minor",
            SeverityLabel::Major => "major",
            SeverityLabel::Critical => "critical",
        }
    }

    /// True for any label other than `No Crack`.
    pub fn is_crack(&self) -> bool {
        !matches!(self, SeverityLabel::NoCrack)
    }
}

impl std::fmt::Display for SeverityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for SeverityLabel {
    type Err = ControlParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "no-crack" | "nocrack" | "none" => Ok(SeverityLabel::NoCrack),
            "minor" => Ok(SeverityLabel::Minor),
            "major" => Ok(SeverityLabel::Major),
            "critical" => Ok(SeverityLabel::Critical),
            _ => Err(ControlParseError::Severity(s.to_string())),
        }
    }
}

// ============================================================================
// Severity Override
// ============================================================================

/// Operator's "Force severity" selector.
///
/// `Auto` defers to the auto-mode policy; `Force` wins unconditionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SeverityOverride {
    #[default]
    Auto,
    Force(SeverityLabel),
}

impl SeverityOverride {
    /// Selector options in the order they appear on the dashboard.
    pub const OPTIONS: [Self; 5] = [
        Self::Auto,
        Self::Force(SeverityLabel::NoCrack),
        Self::Force(SeverityLabel::Minor),
        Self::Force(SeverityLabel::Major),
        Self::Force(SeverityLabel::Critical),
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            SeverityOverride::Auto => "Auto",
            SeverityOverride::Force(label) => label.display_name(),
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            SeverityOverride::Auto => "auto",
            SeverityOverride::Force(label) => label.slug(),
        }
    }

    /// The forced label, if any.
    pub fn forced(&self) -> Option<SeverityLabel> {
        match self {
            SeverityOverride::Auto => None,
            SeverityOverride::Force(label) => Some(*label),
        }
    }
}

impl From<SeverityLabel> for SeverityOverride {
    fn from(label: SeverityLabel) -> Self {
        SeverityOverride::Force(label)
    }
}

impl std::fmt::Display for SeverityOverride {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for SeverityOverride {
    type Err = ControlParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if normalize_token(s) == "auto" {
            return Ok(SeverityOverride::Auto);
        }
        s.parse::<SeverityLabel>()
            .map(SeverityOverride::Force)
            .map_err(|_| ControlParseError::Override(s.to_string()))
    }
}

impl TryFrom<String> for SeverityOverride {
    type Error = ControlParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SeverityOverride> for String {
    fn from(value: SeverityOverride) -> Self {
        value.slug().to_string()
    }
}

// ============================================================================
// Auto Mode
// ============================================================================

/// Background behaviour when no override is forced.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum AutoMode {
    /// Quiet unless the manual trigger fires
    #[default]
    Idle,
    /// A crack event during one wall-clock second out of every window
    Periodic,
    /// Crack events only from the manual trigger
    ManualOnly,
}

impl AutoMode {
    pub const ALL: [Self; 3] = [Self::Idle, Self::Periodic, Self::ManualOnly];

    /// Selector label shown on the dashboard
    pub fn display_name(&self) -> &'static str {
        match self {
            AutoMode::Idle => "Idle background",
            AutoMode::Periodic => "Periodic crack every 10s",
            AutoMode::ManualOnly => "Manual only",
        }
    }

    /// Selector label for a node whose periodic window is
    /// `periodic_window_secs` long. `display_name` assumes the default 10 s.
    pub fn selector_label(&self, periodic_window_secs: u64) -> String {
        match self {
            AutoMode::Periodic => format!("Periodic crack every {periodic_window_secs}s"),
            other => other.display_name().to_string(),
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            AutoMode::Idle => "idle",
            AutoMode::Periodic => "periodic",
            AutoMode::ManualOnly => "manual-only",
        }
    }
}

impl std::fmt::Display for AutoMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for AutoMode {
    type Err = ControlParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "idle" | "idle-background" => Ok(AutoMode::Idle),
            "periodic" => Ok(AutoMode::Periodic),
            t if t.starts_with("periodic-crack-every-") => Ok(AutoMode::Periodic),
            "manual-only" | "manual" => Ok(AutoMode::ManualOnly),
            _ => Err(ControlParseError::AutoMode(s.to_string())),
        }
    }
}
