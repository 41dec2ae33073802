//! End-to-end refresh scenarios
//!
//! Drives `view::render` the way the dashboard does, with a seeded RNG and
//! a pinned clock, and checks what an operator would see.

use chrono::{DateTime, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use regex::Regex;

use smarttrack::classifier::confidence_range;
use smarttrack::decision::{decide, DecisionReason, SeverityPolicy};
use smarttrack::synthesis::{synthesize, time_axis};
use smarttrack::types::{AutoMode, Controls, NodeInfo, SensorKind, SeverityLabel, SeverityOverride};
use smarttrack::view::{render, LedColor, ViewModel, MOCK_ALERT_NOTICE};

fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

fn refresh(controls: Controls, secs: i64, seed: u64) -> ViewModel {
    let mut rng = StdRng::seed_from_u64(seed);
    render(
        &NodeInfo::default(),
        &SeverityPolicy::default(),
        &controls,
        &at(secs),
        &mut rng,
    )
}

// ============================================================================
// Operator-visible scenarios
// ============================================================================

#[test]
fn idle_untriggered_refresh_is_all_clear() {
    for seed in 0..20 {
        let view = refresh(Controls::default(), 1_700_000_000 + seed as i64, seed);

        assert_eq!(view.severity(), SeverityLabel::NoCrack);
        assert_eq!(view.leds.active(), Some(LedColor::Green));
        assert!(confidence_range(SeverityLabel::NoCrack).contains(&view.alert.confidence));
        assert_eq!(view.alert.sample_count, 800);
        assert!(view.alert_notice.is_none());
    }
}

#[test]
fn forced_critical_lights_red() {
    for mode in AutoMode::ALL {
        let controls = Controls::new(mode, SeverityLabel::Critical.into(), false);
        let view = refresh(controls, 1_700_000_003, 7);

        assert_eq!(view.severity(), SeverityLabel::Critical);
        assert_eq!(view.classification.label, SeverityLabel::Critical);
        assert_eq!(view.leds.active(), Some(LedColor::Red));
        let c = view.alert.confidence;
        assert!((0.90..=0.98).contains(&c), "confidence {c}");
        assert_eq!(view.alert_notice, Some(MOCK_ALERT_NOTICE));
    }
}

#[test]
fn minor_crack_lights_yellow() {
    let view = refresh(
        Controls::new(AutoMode::Idle, SeverityLabel::Minor.into(), false),
        5,
        3,
    );
    assert_eq!(view.leds.active(), Some(LedColor::Yellow));
    assert!(!view.leds.green && !view.leds.red);
}

#[test]
fn manual_trigger_only_lasts_one_refresh() {
    let controls = Controls::new(AutoMode::ManualOnly, SeverityOverride::Auto, false);

    let pressed = refresh(controls.with_trigger(), 1_700_000_004, 1);
    assert!(pressed.severity().is_crack());
    assert_eq!(pressed.decision.reason, DecisionReason::Triggered);

    // Next refresh arrives without the pulse.
    let next = refresh(controls, 1_700_000_005, 2);
    assert_eq!(next.severity(), SeverityLabel::NoCrack);
    assert_eq!(next.decision.reason, DecisionReason::AwaitingTrigger);
}

#[test]
fn periodic_mode_fires_once_per_window() {
    let controls = Controls::new(AutoMode::Periodic, SeverityOverride::Auto, false);
    let start = 1_700_000_000;

    let fired: Vec<i64> = (start..start + 30)
        .filter(|secs| refresh(controls, *secs, *secs as u64).severity().is_crack())
        .collect();

    assert_eq!(fired, vec![start, start + 10, start + 20]);
}

#[test]
fn periodic_trigger_outside_window_is_ignored() {
    let controls = Controls::new(AutoMode::Periodic, SeverityOverride::Auto, true);
    let view = refresh(controls, 1_700_000_007, 9);
    assert_eq!(view.severity(), SeverityLabel::NoCrack);
    assert_eq!(view.decision.reason, DecisionReason::PeriodicQuiet);
}

#[test]
fn alert_timestamp_format() {
    let re = Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}$").unwrap();
    let view = refresh(Controls::default(), 1_700_000_000, 0);
    assert!(re.is_match(&view.alert.timestamp), "{}", view.alert.timestamp);
    assert_eq!(view.alert.timestamp, "2023-11-14 22:13:20");
}

#[test]
fn alert_json_matches_wire_shape() {
    let view = refresh(
        Controls::new(AutoMode::Idle, SeverityLabel::Major.into(), false),
        1_700_000_000,
        4,
    );
    let json = serde_json::to_value(&view.alert).unwrap();
    assert_eq!(json["node_id"], "ANCHOR-001");
    assert_eq!(json["gps"], "11.0100,76.9500");
    assert_eq!(json["severity"], "Major");
    assert_eq!(json["waveform_samples"], 800);

    let c = json["confidence"].as_f64().unwrap();
    assert!((0.85..=0.95).contains(&c));
    assert!(((c * 100.0) - (c * 100.0).round()).abs() < 1e-9);
}

// ============================================================================
// Synthesizer and policy properties
// ============================================================================

#[test]
fn every_waveform_has_800_samples_on_unit_interval() {
    let mut rng = StdRng::seed_from_u64(11);
    for kind in SensorKind::ALL {
        for label in SeverityLabel::ALL {
            let w = synthesize(kind, label, &mut rng);
            assert_eq!(w.times.len(), 800);
            assert_eq!(w.amplitudes.len(), 800);
            assert_eq!(w.times[0], 0.0);
            assert_eq!(w.times[799], 1.0);
            assert!(w.times.windows(2).all(|p| p[1] > p[0]));
        }
    }

    let t = time_axis(800);
    let step = 1.0 / 799.0;
    assert!(t.windows(2).all(|p| ((p[1] - p[0]) - step).abs() < 1e-12));
}

#[test]
fn override_beats_every_other_control() {
    let mut rng = StdRng::seed_from_u64(12);
    for mode in AutoMode::ALL {
        for triggered in [false, true] {
            for secs in [0, 1, 1_700_000_000, 1_700_000_009] {
                let got = decide(mode, SeverityLabel::Minor.into(), triggered, &at(secs), &mut rng);
                assert_eq!(got, SeverityLabel::Minor);
            }
        }
    }
}
