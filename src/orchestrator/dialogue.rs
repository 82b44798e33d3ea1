//! Scripted dialogue: step table, message templates and thinking labels

use serde::{Deserialize, Serialize};
use std::fmt;

/// First assistant message of every session
pub const GREETING: &str = "Hello! I'm Orbit. Where are we flying today?";

/// Replies for steps 1-4, indexed by `step - 1`
const SCRIPTED_PROMPTS: [&str; 4] = [
    "Great choice. Where will you be flying from?",
    "Noted. What are your preferred travel dates?",
    "Got it. How many people are travelling?",
    "And finally, what's the vibe for this trip? (e.g., Relaxed, Adventure, Party)",
];

/// Step reached by answering the vibe prompt
pub const FLIGHT_SCAN_STEP: u32 = SCRIPTED_PROMPTS.len() as u32 + 1;

pub const LISTENING: &str = "I'm listening...";
pub const FLIGHTS_FOUND: &str = "Based on your preferences, I've found these best-value flights.";
pub const HOTELS_OFFERED: &str =
    "Flight confirmed. Now, for your stay – here are options matching your verified vibe.";
pub const ALTERNATE_REQUEST: &str = "I want to see other flight options.";
pub const ALTERNATE_FLIGHTS: &str =
    "Certainly. Analyzing alternative flights based on your schedule...";

/// Stand-in for the name of an option id that did not resolve
pub const UNRESOLVED_NAME: &str = "(unavailable option)";

pub const LABEL_SCANNING: &str = "Scanning global flight databases...";
pub const LABEL_RECALCULATING: &str = "Re-calculating travel vectors...";
pub const LABEL_CURATING_HOTELS: &str = "Curating sustainable hotel options...";
pub const LABEL_FINALIZING: &str = "Finalizing reservation details...";
pub const LABEL_RETRIEVING_FLIGHTS: &str = "Retrieving alternative flights...";
/// Shown by front-ends while thinking without a specific label
pub const LABEL_DEFAULT: &str = "Synthesizing travel path...";

/// What the assistant does once the standard reply latency elapses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptedReply {
    /// Plain text question
    Prompt(&'static str),
    /// No text; start the flight scan phase instead
    FlightScan,
    /// Fallback once the script is exhausted
    Listening,
}

impl ScriptedReply {
    /// Reply for the step value reached by a text submission
    ///
    /// # Examples
    ///
    /// ```
    /// use orbit::orchestrator::dialogue::{ScriptedReply, FLIGHT_SCAN_STEP};
    ///
    /// assert_eq!(
    ///     ScriptedReply::for_step(1),
    ///     ScriptedReply::Prompt("Great choice. Where will you be flying from?")
    /// );
    /// assert_eq!(ScriptedReply::for_step(FLIGHT_SCAN_STEP), ScriptedReply::FlightScan);
    /// assert_eq!(ScriptedReply::for_step(12), ScriptedReply::Listening);
    /// ```
    pub fn for_step(step: u32) -> Self {
        if step == FLIGHT_SCAN_STEP {
            return Self::FlightScan;
        }
        step.checked_sub(1)
            .and_then(|index| SCRIPTED_PROMPTS.get(index as usize))
            .map_or(Self::Listening, |text| Self::Prompt(*text))
    }
}

/// Where the conversation stands relative to the flight scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialoguePhase {
    /// Collecting destination, origin, dates, travelers and vibe
    #[default]
    Gathering,
    /// Vibe answered; the standard latency has not elapsed yet
    AwaitingScan,
    /// Scan latency running under the scanning label
    Scanning,
    /// Flight catalog has been shown
    FlightsPresented,
}

impl fmt::Display for DialoguePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gathering => write!(f, "gathering"),
            Self::AwaitingScan => write!(f, "awaiting_scan"),
            Self::Scanning => write!(f, "scanning"),
            Self::FlightsPresented => write!(f, "flights_presented"),
        }
    }
}

pub fn flight_switch_text(airline: Option<&str>) -> String {
    format!(
        "Switching to {}... NOTE: This flight arrives later. I've updated your transfer to a private taxi to ensure you reach the hotel comfortably, though traffic might be higher.",
        airline.unwrap_or(UNRESOLVED_NAME)
    )
}

pub fn hotel_confirmed_text(hotel_name: Option<&str>, total_days: u32) -> String {
    format!(
        "Excellent. Access to {} confirmed. Generating your full {}-day itinerary now...",
        hotel_name.unwrap_or(UNRESOLVED_NAME),
        total_days
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_order() {
        let texts: Vec<ScriptedReply> = (1..=4).map(ScriptedReply::for_step).collect();
        assert_eq!(
            texts,
            vec![
                ScriptedReply::Prompt("Great choice. Where will you be flying from?"),
                ScriptedReply::Prompt("Noted. What are your preferred travel dates?"),
                ScriptedReply::Prompt("Got it. How many people are travelling?"),
                ScriptedReply::Prompt(
                    "And finally, what's the vibe for this trip? (e.g., Relaxed, Adventure, Party)"
                ),
            ]
        );
    }

    #[test]
    fn test_flight_scan_follows_vibe_prompt() {
        assert_eq!(FLIGHT_SCAN_STEP, 5);
        assert_eq!(ScriptedReply::for_step(5), ScriptedReply::FlightScan);
    }

    #[test]
    fn test_listening_fallback() {
        assert_eq!(ScriptedReply::for_step(0), ScriptedReply::Listening);
        assert_eq!(ScriptedReply::for_step(6), ScriptedReply::Listening);
        assert_eq!(ScriptedReply::for_step(u32::MAX), ScriptedReply::Listening);
    }

    #[test]
    fn test_flight_switch_text_mentions_taxi() {
        let text = flight_switch_text(Some("Vistara UK-88"));
        assert!(text.starts_with("Switching to Vistara UK-88..."));
        assert!(text.contains("private taxi"));
        assert!(text.contains("traffic might be higher"));
    }

    #[test]
    fn test_unresolved_names_use_placeholder() {
        assert!(flight_switch_text(None).contains(UNRESOLVED_NAME));
        assert_eq!(
            hotel_confirmed_text(None, 4),
            "Excellent. Access to (unavailable option) confirmed. Generating your full 4-day itinerary now..."
        );
    }

    #[test]
    fn test_dialogue_phase_serializes_snake_case() {
        let json = serde_json::to_string(&DialoguePhase::FlightsPresented).unwrap();
        assert_eq!(json, "\"flights_presented\"");
    }
}
