//! Mock on-edge classifier
//!
//! There is no model: the "prediction" is the label the decision policy
//! already chose, and the confidence is drawn uniformly from a range that
//! depends on that label.

use rand::Rng;
use serde::Serialize;
use std::ops::RangeInclusive;

use crate::types::SeverityLabel;

/// Classifier output shown in the "On-Edge Classifier" box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub label: SeverityLabel,
    /// Rounded to two decimals
    pub confidence: f64,
}

/// Range the mock confidence is sampled from.
pub fn confidence_range(label: SeverityLabel) -> RangeInclusive<f64> {
    match label {
        SeverityLabel::NoCrack => 0.90..=0.99,
        SeverityLabel::Minor => 0.70..=0.88,
        SeverityLabel::Major => 0.85..=0.95,
        SeverityLabel::Critical => 0.90..=0.98,
    }
}

pub fn classify<R: Rng + ?Sized>(label: SeverityLabel, rng: &mut R) -> Classification {
    let raw = rng.gen_range(confidence_range(label));
    Classification {
        label,
        confidence: round_hundredths(raw),
    }
}

/// Round to two decimal places.
///
/// Range bounds are themselves two-decimal values, so rounding never
/// leaves the range.
pub fn round_hundredths(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
