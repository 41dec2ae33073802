//! Operator inputs for a single refresh

use serde::{Deserialize, Serialize};

use super::{normalize_token, AutoMode, ControlParseError, SeverityOverride};

/// The three dashboard controls, as read at the start of a refresh.
///
/// `triggered` is a pulse: it is true only for the refresh caused by the
/// "Trigger Crack Event" button.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Controls {
    pub auto_mode: AutoMode,
    #[serde(rename = "override")]
    pub severity_override: SeverityOverride,
    pub triggered: bool,
}

impl Controls {
    pub fn new(auto_mode: AutoMode, severity_override: SeverityOverride, triggered: bool) -> Self {
        Self {
            auto_mode,
            severity_override,
            triggered,
        }
    }

    /// Same controls with the trigger pulse set.
    pub fn with_trigger(self) -> Self {
        Self {
            triggered: true,
            ..self
        }
    }
}

/// Interpret the trigger flag as sent by a form, a script or a person.
///
/// An empty value counts as not pressed.
pub fn parse_trigger(s: &str) -> Result<bool, ControlParseError> {
    match normalize_token(s).as_str() {
        "" | "false" | "0" | "off" | "no" => Ok(false),
        "true" | "1" | "on" | "yes" => Ok(true),
        _ => Err(ControlParseError::Trigger(s.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_spellings() {
        for s in ["true", "TRUE", "1", "on", "yes", " On "] {
            assert_eq!(parse_trigger(s), Ok(true), "{s}");
        }
        for s in ["", "false", "0", "off", "no"] {
            assert_eq!(parse_trigger(s), Ok(false), "{s}");
        }
    }

    #[test]
    fn test_trigger_rejects_garbage() {
        assert_eq!(
            parse_trigger("maybe"),
            Err(ControlParseError::Trigger("maybe".to_string()))
        );
    }

    #[test]
    fn test_with_trigger_keeps_selectors() {
        let c = Controls::new(AutoMode::Periodic, SeverityOverride::Auto, false).with_trigger();
        assert!(c.triggered);
        assert_eq!(c.auto_mode, AutoMode::Periodic);
    }
}
