//! Device status LEDs

use serde::Serialize;

use crate::types::SeverityLabel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LedColor {
    Green,
    Yellow,
    Red,
}

impl LedColor {
    pub const ALL: [Self; 3] = [Self::Green, Self::Yellow, Self::Red];

    pub fn name(&self) -> &'static str {
        match self {
            LedColor::Green => "Green",
            LedColor::Yellow => "Yellow",
            LedColor::Red => "Red",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            LedColor::Green => "🟢",
            LedColor::Yellow => "🟡",
            LedColor::Red => "🔴",
        }
    }
}

/// Three-LED panel; exactly one is lit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusLeds {
    pub green: bool,
    pub yellow: bool,
    pub red: bool,
}

impl StatusLeds {
    pub fn for_severity(label: SeverityLabel) -> Self {
        let active = Self::color_for(label);
        Self {
            green: active == LedColor::Green,
            yellow: active == LedColor::Yellow,
            red: active == LedColor::Red,
        }
    }

    /// Green for No Crack, yellow for Minor, red for Major and Critical.
    pub fn color_for(label: SeverityLabel) -> LedColor {
        match label {
            SeverityLabel::NoCrack => LedColor::Green,
            SeverityLabel::Minor => LedColor::Yellow,
            SeverityLabel::Major | SeverityLabel::Critical => LedColor::Red,
        }
    }

    pub fn is_on(&self, color: LedColor) -> bool {
        match color {
            LedColor::Green => self.green,
            LedColor::Yellow => self.yellow,
            LedColor::Red => self.red,
        }
    }

    pub fn active(&self) -> Option<LedColor> {
        LedColor::ALL.into_iter().find(|c| self.is_on(*c))
    }

    /// "🟢 Green ON" / "🔴 Red OFF"
    pub fn caption(&self, color: LedColor) -> String {
        let state = if self.is_on(color) { "ON" } else { "OFF" };
        format!("{} {} {}", color.emoji(), color.name(), state)
    }
}
