//! Orchestrator telemetry
//!
//! Recorded through the `metrics` facade; nothing is exported unless the
//! embedding application installs a recorder.
//!
//! # Metrics
//!
//! - `orbit_intents_total`: Counter of accepted intents by kind
//! - `orbit_intents_ignored_total`: Counter of intents dropped before reaching the session
//! - `orbit_pending_phases`: Gauge of scheduled phases that have not fired
//! - `orbit_phases_total`: Counter of phases by name and outcome (`fired`, `stale`)
//! - `orbit_unresolved_options_total`: Counter of option ids missing from the catalog

use crate::ledger::OptionKind;
use metrics::{decrement_gauge, increment_counter, increment_gauge};

pub(crate) fn intent_accepted(intent: &'static str) {
    increment_counter!("orbit_intents_total", "intent" => intent);
}

pub(crate) fn intent_ignored(intent: &'static str) {
    increment_counter!("orbit_intents_ignored_total", "intent" => intent);
}

pub(crate) fn phase_scheduled() {
    increment_gauge!("orbit_pending_phases", 1.0);
}

pub(crate) fn phase_fired(phase: &'static str) {
    decrement_gauge!("orbit_pending_phases", 1.0);
    increment_counter!("orbit_phases_total", "phase" => phase, "outcome" => "fired");
}

pub(crate) fn phase_stale(phase: &'static str) {
    decrement_gauge!("orbit_pending_phases", 1.0);
    increment_counter!("orbit_phases_total", "phase" => phase, "outcome" => "stale");
}

pub(crate) fn phases_aborted(count: usize) {
    if count > 0 {
        decrement_gauge!("orbit_pending_phases", count as f64);
    }
}

pub(crate) fn option_unresolved(kind: OptionKind) {
    increment_counter!("orbit_unresolved_options_total", "kind" => kind.to_string());
}
