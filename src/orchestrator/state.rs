//! Orchestrator flags and the snapshot handed to presentation layers

use super::dialogue::{DialoguePhase, LABEL_DEFAULT};
use crate::catalog::{FlightOption, HotelOption, PlanEvent, PlanVariant};
use crate::ledger::ChatMessage;
use serde::Serialize;

/// Step counter and flags owned by the orchestrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrchestratorState {
    /// Number of text submissions so far; never decreases
    pub step: u32,
    pub thinking: bool,
    pub thinking_label: Option<String>,
    /// Set once a committed flight is swapped for a different one
    pub replanning: bool,
    pub generating_plan: bool,
    pub dashboard_visible: bool,
    pub current_day: u32,
    pub phase: DialoguePhase,
}

impl Default for OrchestratorState {
    fn default() -> Self {
        Self {
            step: 0,
            thinking: false,
            thinking_label: None,
            replanning: false,
            generating_plan: false,
            dashboard_visible: false,
            current_day: 1,
            phase: DialoguePhase::Gathering,
        }
    }
}

impl OrchestratorState {
    pub(crate) fn start_thinking(&mut self, label: Option<&str>) {
        self.thinking = true;
        self.thinking_label = label.map(str::to_string);
    }

    pub(crate) fn stop_thinking(&mut self) {
        self.thinking = false;
        self.thinking_label = None;
    }

    pub fn plan_variant(&self) -> PlanVariant {
        PlanVariant::for_replanning(self.replanning)
    }
}

/// Everything a presentation layer needs to render one frame
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub messages: Vec<ChatMessage>,
    pub thinking: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thinking_label: Option<String>,
    pub step: u32,
    pub phase: DialoguePhase,
    pub replanning: bool,
    pub generating_plan: bool,
    pub dashboard_visible: bool,
    pub current_day: u32,
    pub total_days: u32,
    pub plan_variant: PlanVariant,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_flight: Option<FlightOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_hotel: Option<HotelOption>,
    /// Events of the current day, empty until the dashboard is visible
    pub visible_events: Vec<PlanEvent>,
}

impl SessionSnapshot {
    /// Text for the thinking indicator, if one should be shown
    pub fn thinking_display(&self) -> Option<&str> {
        self.thinking
            .then(|| self.thinking_label.as_deref().unwrap_or(LABEL_DEFAULT))
    }

    /// Dashboard header line, e.g. "4 Days • Indigo 6E-23 + The St. Regis Goa"
    pub fn trip_summary(&self) -> String {
        format!(
            "{} Days • {} + {}",
            self.total_days,
            self.selected_flight
                .as_ref()
                .map_or("No flight", |f| f.airline.as_str()),
            self.selected_hotel
                .as_ref()
                .map_or("No hotel", |h| h.name.as_str()),
        )
    }

    pub fn plan_status(&self) -> &'static str {
        if self.replanning {
            "Updated Plan"
        } else {
            "Smart Plan Active"
        }
    }

    /// Day numbers offered by the day selector
    pub fn day_selector(&self) -> std::ops::RangeInclusive<u32> {
        1..=self.total_days
    }

    pub fn last_message(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }
}
