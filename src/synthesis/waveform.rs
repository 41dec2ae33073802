//! Waveform synthesizer
//!
//! Every refresh fabricates one waveform per sensor channel:
//!
//! ```text
//! amplitude[i] = base(kind, t[i]) + noise[i] + pulse(kind, severity, t[i])
//! ```
//!
//! over `WAVEFORM_SAMPLES` evenly spaced points on the closed interval
//! [0, 1]. Noise is drawn from the caller's random source so tests can
//! seed it.

use rand::Rng;
use rand_distr::StandardNormal;
use serde::Serialize;
use statrs::statistics::Statistics;

use super::pulse::{pulse, BaseProfile};
use crate::config::defaults::WAVEFORM_SAMPLES;
use crate::types::{SensorKind, SeverityLabel};

/// One synthesized channel.
#[derive(Debug, Clone, Serialize)]
pub struct Waveform {
    pub kind: SensorKind,
    pub severity: SeverityLabel,
    pub times: Vec<f64>,
    pub amplitudes: Vec<f64>,
}

/// Summary statistics shown next to the classifier output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WaveformSummary {
    /// Largest absolute amplitude
    pub peak_amplitude: f64,
    /// Time at which the peak occurs
    pub peak_time: f64,
    /// Root mean square of the amplitudes
    pub rms: f64,
    /// Sample standard deviation of the amplitudes
    pub std_dev: f64,
}

impl Waveform {
    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// Plot title, e.g. "AE (Acoustic Emission) — Major"
    pub fn title(&self) -> String {
        format!("{} — {}", self.kind.plot_title(), self.severity)
    }

    pub fn summary(&self) -> WaveformSummary {
        let (peak_idx, peak_amplitude) = self
            .amplitudes
            .iter()
            .map(|a| a.abs())
            .enumerate()
            .fold((0, 0.0_f64), |best, (i, a)| if a > best.1 { (i, a) } else { best });

        WaveformSummary {
            peak_amplitude,
            peak_time: self.times.get(peak_idx).copied().unwrap_or(0.0),
            rms: self.amplitudes.iter().quadratic_mean(),
            std_dev: self.amplitudes.iter().std_dev(),
        }
    }
}

/// `samples` evenly spaced points from 0.0 to 1.0 inclusive.
///
/// The last point is pinned to exactly 1.0 so accumulated rounding never
/// leaves the window short.
pub fn time_axis(samples: usize) -> Vec<f64> {
    match samples {
        0 => Vec::new(),
        1 => vec![0.0],
        n => {
            let step = 1.0 / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { 1.0 } else { i as f64 * step })
                .collect()
        }
    }
}

/// Noise-free signal: base sinusoid plus crack pulse.
pub fn clean_signal(kind: SensorKind, severity: SeverityLabel, t: f64) -> f64 {
    BaseProfile::for_sensor(kind).at(t) + pulse(kind, severity, t)
}

/// Synthesize one channel with the standard sample count.
pub fn synthesize<R: Rng + ?Sized>(kind: SensorKind, severity: SeverityLabel, rng: &mut R) -> Waveform {
    synthesize_with_samples(kind, severity, WAVEFORM_SAMPLES, rng)
}

/// Synthesize one channel over an arbitrary number of samples.
pub fn synthesize_with_samples<R: Rng + ?Sized>(
    kind: SensorKind,
    severity: SeverityLabel,
    samples: usize,
    rng: &mut R,
) -> Waveform {
    let base = BaseProfile::for_sensor(kind);
    let times = time_axis(samples);
    let amplitudes = times
        .iter()
        .map(|&t| {
            let z: f64 = rng.sample(StandardNormal);
            base.at(t) + base.noise_std * z + pulse(kind, severity, t)
        })
        .collect();

    Waveform {
        kind,
        severity,
        times,
        amplitudes,
    }
}

/// Synthesize every channel for one refresh, in plot order.
pub fn synthesize_all<R: Rng + ?Sized>(severity: SeverityLabel, rng: &mut R) -> Vec<Waveform> {
    SensorKind::ALL
        .iter()
        .map(|&kind| synthesize(kind, severity, rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesis::pulse::PulseShape;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_output_length_is_fixed() {
        let mut rng = StdRng::seed_from_u64(7);
        for kind in SensorKind::ALL {
            for severity in SeverityLabel::ALL {
                let w = synthesize(kind, severity, &mut rng);
                assert_eq!(w.times.len(), 800);
                assert_eq!(w.amplitudes.len(), 800);
                assert_eq!(w.len(), 800);
            }
        }
    }

    #[test]
    fn test_time_axis_evenly_spaced() {
        let t = time_axis(800);
        assert_eq!(t[0], 0.0);
        assert_eq!(t[799], 1.0);

        let step = 1.0 / 799.0;
        for pair in t.windows(2) {
            assert!(pair[1] > pair[0]);
            assert!((pair[1] - pair[0] - step).abs() < 1e-12);
        }
    }

    #[test]
    fn test_time_axis_degenerate_sizes() {
        assert!(time_axis(0).is_empty());
        assert_eq!(time_axis(1), vec![0.0]);
        assert_eq!(time_axis(2), vec![0.0, 1.0]);
    }

    #[test]
    fn test_noise_stays_near_clean_signal() {
        let mut rng = StdRng::seed_from_u64(42);
        for kind in SensorKind::ALL {
            let sigma = BaseProfile::for_sensor(kind).noise_std;
            let w = synthesize(kind, SeverityLabel::Major, &mut rng);

            let residuals: Vec<f64> = w
                .times
                .iter()
                .zip(&w.amplitudes)
                .map(|(&t, &a)| a - clean_signal(kind, SeverityLabel::Major, t))
                .collect();

            let mean = residuals.iter().mean();
            let sd = residuals.iter().std_dev();
            assert!(mean.abs() < sigma * 0.2, "{kind}: mean {mean}");
            assert!((sd - sigma).abs() < sigma * 0.15, "{kind}: sd {sd}");
        }
    }

    #[test]
    fn test_same_seed_same_waveform() {
        let a = synthesize(SensorKind::GuidedWave, SeverityLabel::Minor, &mut StdRng::seed_from_u64(3));
        let b = synthesize(SensorKind::GuidedWave, SeverityLabel::Minor, &mut StdRng::seed_from_u64(3));
        assert_eq!(a.amplitudes, b.amplitudes);
    }

    #[test]
    fn test_critical_peak_sits_on_pulse_center() {
        let mut rng = StdRng::seed_from_u64(11);
        for kind in SensorKind::ALL {
            let shape = PulseShape::lookup(kind, SeverityLabel::Critical).unwrap();
            let summary = synthesize(kind, SeverityLabel::Critical, &mut rng).summary();
            assert!((summary.peak_time - shape.center).abs() < 0.05, "{kind}: {summary:?}");
            assert!(summary.peak_amplitude > shape.amplitude * 0.9);
        }
    }

    #[test]
    fn test_no_crack_stays_small() {
        let mut rng = StdRng::seed_from_u64(5);
        for kind in SensorKind::ALL {
            let summary = synthesize(kind, SeverityLabel::NoCrack, &mut rng).summary();
            // Base amplitude plus a generous noise allowance.
            assert!(summary.peak_amplitude < 0.08, "{kind}: {summary:?}");
        }
    }

    #[test]
    fn test_synthesize_all_in_plot_order() {
        let mut rng = StdRng::seed_from_u64(1);
        let all = synthesize_all(SeverityLabel::Minor, &mut rng);
        let kinds: Vec<_> = all.iter().map(|w| w.kind).collect();
        assert_eq!(kinds, SensorKind::ALL.to_vec());
        assert!(all.iter().all(|w| w.severity == SeverityLabel::Minor));
    }

    #[test]
    fn test_title() {
        let mut rng = StdRng::seed_from_u64(1);
        let w = synthesize(SensorKind::Accelerometer, SeverityLabel::Critical, &mut rng);
        assert_eq!(w.title(), "Accelerometer Array — Critical");
    }
}
