//! Synthetic sensor waveforms
//!
//! - `pulse`: per-channel base sinusoid and crack-pulse constants
//! - `waveform`: the synthesizer and summary statistics

pub mod pulse;
pub mod waveform;

pub use pulse::{pulse, BaseProfile, PulseShape};
pub use waveform::{
    clean_signal, synthesize, synthesize_all, synthesize_with_samples, time_axis, Waveform,
    WaveformSummary,
};
