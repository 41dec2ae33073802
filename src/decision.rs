//! Severity decision policy
//!
//! Turns the operator controls plus the current wall-clock time into the
//! severity label for one refresh. Rules are evaluated in order and the
//! first match wins:
//!
//! 1. A forced override is returned verbatim.
//! 2. Manual-only mode without a trigger is quiet.
//! 3. Periodic mode fires a random crack event during the first second of
//!    every window (default 10 s) and is quiet otherwise.
//! 4. A manual trigger fires a random crack event.
//! 5. Otherwise quiet.
//!
//! Periodic mode depends only on absolute time, so two dashboards open at
//! the same moment agree on whether an event is active.

use chrono::{DateTime, TimeZone};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::config::defaults::PERIODIC_WINDOW_SECS;
use crate::types::{AutoMode, Controls, SeverityLabel, SeverityOverride};

/// Which rule produced the severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    /// Operator forced a label
    Override,
    /// Manual-only mode, trigger not pressed
    AwaitingTrigger,
    /// Periodic mode, inside the event second
    PeriodicEvent,
    /// Periodic mode, outside the event second
    PeriodicQuiet,
    /// Manual trigger fired
    Triggered,
    /// Nothing happening
    Quiet,
}

impl DecisionReason {
    pub fn description(&self) -> &'static str {
        match self {
            DecisionReason::Override => "forced by operator override",
            DecisionReason::AwaitingTrigger => "manual only, waiting for trigger",
            DecisionReason::PeriodicEvent => "periodic crack window",
            DecisionReason::PeriodicQuiet => "periodic mode, between events",
            DecisionReason::Triggered => "manual trigger",
            DecisionReason::Quiet => "idle background",
        }
    }
}

/// Outcome of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub severity: SeverityLabel,
    pub reason: DecisionReason,
}

/// Decision policy with a configurable periodic window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeverityPolicy {
    periodic_window_secs: u64,
}

impl Default for SeverityPolicy {
    fn default() -> Self {
        Self {
            periodic_window_secs: PERIODIC_WINDOW_SECS,
        }
    }
}

impl SeverityPolicy {
    /// A zero window is treated as one second: every refresh is an event.
    pub fn new(periodic_window_secs: u64) -> Self {
        Self {
            periodic_window_secs: periodic_window_secs.max(1),
        }
    }

    pub fn periodic_window_secs(&self) -> u64 {
        self.periodic_window_secs
    }

    /// True when `now` falls in the event second of the periodic window.
    ///
    /// Uses the floor of the Unix timestamp, so times before the epoch
    /// are still bucketed consistently.
    pub fn in_event_window<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        let window = i64::try_from(self.periodic_window_secs).unwrap_or(i64::MAX);
        now.timestamp().rem_euclid(window) == 0
    }

    /// Evaluate the rules and report which one fired.
    pub fn evaluate<Tz: TimeZone, R: Rng + ?Sized>(
        &self,
        controls: &Controls,
        now: &DateTime<Tz>,
        rng: &mut R,
    ) -> Decision {
        if let SeverityOverride::Force(label) = controls.severity_override {
            return Decision {
                severity: label,
                reason: DecisionReason::Override,
            };
        }

        if controls.auto_mode == AutoMode::ManualOnly && !controls.triggered {
            return quiet(DecisionReason::AwaitingTrigger);
        }

        if controls.auto_mode == AutoMode::Periodic {
            return if self.in_event_window(now) {
                Decision {
                    severity: random_crack(rng),
                    reason: DecisionReason::PeriodicEvent,
                }
            } else {
                quiet(DecisionReason::PeriodicQuiet)
            };
        }

        if controls.triggered {
            return Decision {
                severity: random_crack(rng),
                reason: DecisionReason::Triggered,
            };
        }

        quiet(DecisionReason::Quiet)
    }

    /// Severity only.
    pub fn decide<Tz: TimeZone, R: Rng + ?Sized>(
        &self,
        controls: &Controls,
        now: &DateTime<Tz>,
        rng: &mut R,
    ) -> SeverityLabel {
        self.evaluate(controls, now, rng).severity
    }
}

/// Decide with the default ten-second periodic window.
pub fn decide<Tz: TimeZone, R: Rng + ?Sized>(
    auto_mode: AutoMode,
    severity_override: SeverityOverride,
    triggered: bool,
    now: &DateTime<Tz>,
    rng: &mut R,
) -> SeverityLabel {
    let controls = Controls::new(auto_mode, severity_override, triggered);
    SeverityPolicy::default().decide(&controls, now, rng)
}

fn quiet(reason: DecisionReason) -> Decision {
    Decision {
        severity: SeverityLabel::NoCrack,
        reason,
    }
}

/// Uniform pick from Minor / Major / Critical.
fn random_crack<R: Rng + ?Sized>(rng: &mut R) -> SeverityLabel {
    SeverityLabel::CRACK_EVENTS
        .choose(rng)
        .copied()
        .unwrap_or(SeverityLabel::Critical)
}
