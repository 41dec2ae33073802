//! Base-signal and crack-pulse constants per sensor channel.

use serde::Serialize;

use crate::types::{SensorKind, SeverityLabel};

/// Steady-state signal a channel shows with no crack activity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BaseProfile {
    /// Sinusoid frequency over the one-second window (Hz)
    pub frequency_hz: f64,
    /// Sinusoid amplitude
    pub amplitude: f64,
    /// Standard deviation of the additive Gaussian noise
    pub noise_std: f64,
}

impl BaseProfile {
    pub fn for_sensor(kind: SensorKind) -> Self {
        match kind {
            SensorKind::AcousticEmission => Self {
                frequency_hz: 60.0,
                amplitude: 0.02,
                noise_std: 0.01,
            },
            SensorKind::Accelerometer => Self {
                frequency_hz: 12.0,
                amplitude: 0.02,
                noise_std: 0.005,
            },
            SensorKind::GuidedWave => Self {
                frequency_hz: 150.0,
                amplitude: 0.01,
                noise_std: 0.01,
            },
        }
    }

    /// Noise-free base value at `t` seconds.
    pub fn at(&self, t: f64) -> f64 {
        self.amplitude * (std::f64::consts::TAU * self.frequency_hz * t).sin()
    }
}

/// Gaussian bump `A * exp(-k * (t - c)^2)` superimposed on the base signal
/// when a crack event is simulated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PulseShape {
    /// Peak amplitude `A`
    pub amplitude: f64,
    /// Width parameter `k`; larger is narrower
    pub width: f64,
    /// Peak location `c` within the window
    pub center: f64,
}

impl PulseShape {
    const fn new(amplitude: f64, width: f64, center: f64) -> Self {
        Self {
            amplitude,
            width,
            center,
        }
    }

    /// Pulse constants for a channel at a given severity.
    ///
    /// `None` for `No Crack`. Peak amplitude grows Minor < Major < Critical
    /// on every channel. The guided-wave echo arrives earlier as the crack
    /// gets worse.
    pub fn lookup(kind: SensorKind, severity: SeverityLabel) -> Option<Self> {
        use SensorKind::{AcousticEmission, Accelerometer, GuidedWave};
        use SeverityLabel::{Critical, Major, Minor, NoCrack};

        let shape = match (kind, severity) {
            (_, NoCrack) => return None,

            (AcousticEmission, Minor) => Self::new(0.15, 150.0, 0.5),
            (AcousticEmission, Major) => Self::new(0.5, 80.0, 0.5),
            (AcousticEmission, Critical) => Self::new(1.0, 40.0, 0.5),

            (Accelerometer, Minor) => Self::new(0.12, 200.0, 0.5),
            (Accelerometer, Major) => Self::new(0.35, 100.0, 0.5),
            (Accelerometer, Critical) => Self::new(0.8, 60.0, 0.5),

            (GuidedWave, Minor) => Self::new(0.08, 300.0, 0.7),
            (GuidedWave, Major) => Self::new(0.3, 150.0, 0.6),
            (GuidedWave, Critical) => Self::new(0.8, 90.0, 0.55),
        };
        Some(shape)
    }

    pub fn at(&self, t: f64) -> f64 {
        let d = t - self.center;
        self.amplitude * (-self.width * d * d).exp()
    }
}

/// Pulse contribution at `t`; zero when there is no crack.
pub fn pulse(kind: SensorKind, severity: SeverityLabel, t: f64) -> f64 {
    PulseShape::lookup(kind, severity).map_or(0.0, |p| p.at(t))
}
