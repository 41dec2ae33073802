//! Sensor channels carried by the virtual anchor node

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{normalize_token, ControlParseError};

/// Sensor channel whose waveform is synthesized each refresh.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SensorKind {
    /// Acoustic emission: crack energy bursts
    #[serde(rename = "AE")]
    AcousticEmission,
    /// MEMS accelerometer array: impact + resonance
    #[serde(rename = "Accel")]
    Accelerometer,
    /// Guided-wave ultrasonic: echo delay
    #[serde(rename = "GW")]
    GuidedWave,
}

impl SensorKind {
    /// Plot order on the dashboard.
    pub const ALL: [Self; 3] = [Self::AcousticEmission, Self::Accelerometer, Self::GuidedWave];

    /// Short code used in the payload and in CSV headers
    pub fn code(&self) -> &'static str {
        match self {
            SensorKind::AcousticEmission => "AE",
            SensorKind::Accelerometer => "Accel",
            SensorKind::GuidedWave => "GW",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            SensorKind::AcousticEmission => "ae",
            SensorKind::Accelerometer => "accel",
            SensorKind::GuidedWave => "gw",
        }
    }

    /// Plot title prefix
    pub fn plot_title(&self) -> &'static str {
        match self {
            SensorKind::AcousticEmission => "AE (Acoustic Emission)",
            SensorKind::Accelerometer => "Accelerometer Array",
            SensorKind::GuidedWave => "Guided-Wave UT Echo",
        }
    }

    /// One-line operator note describing what the channel picks up
    pub fn note(&self) -> &'static str {
        match self {
            SensorKind::AcousticEmission => "AE: Acoustic emission → crack energy bursts",
            SensorKind::Accelerometer => "Accel: MEMS vibration → impact + resonance",
            SensorKind::GuidedWave => "GW-UT: Guided-wave ultrasonic → echo delay",
        }
    }
}

/// Note for the temperature channel, which only provides context and is
/// never plotted.
pub const TEMPERATURE_NOTE: &str = "Temp: Context (not shown in demo)";

impl std::fmt::Display for SensorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for SensorKind {
    type Err = ControlParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "ae" | "acoustic-emission" => Ok(SensorKind::AcousticEmission),
            "accel" | "accelerometer" => Ok(SensorKind::Accelerometer),
            "gw" | "gw-ut" | "guided-wave" => Ok(SensorKind::GuidedWave),
            _ => Err(ControlParseError::Sensor(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensor_round_trips_through_slug() {
        for kind in SensorKind::ALL {
            assert_eq!(kind.slug().parse::<SensorKind>().unwrap(), kind);
            assert_eq!(kind.code().parse::<SensorKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_sensor_serializes_as_code() {
        assert_eq!(serde_json::to_string(&SensorKind::GuidedWave).unwrap(), "\"GW\"");
    }

    #[test]
    fn test_unknown_sensor() {
        assert_eq!(
            "temp".parse::<SensorKind>(),
            Err(ControlParseError::Sensor("temp".to_string()))
        );
    }
}
