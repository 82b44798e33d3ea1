//! Reference data types: flight and hotel options, itinerary events

use serde::{Deserialize, Serialize};
use std::fmt;

/// A bookable flight offered during the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightOption {
    /// Stable identifier used by `select_option`
    pub id: String,
    /// Airline and flight number, e.g. "Indigo 6E-23"
    pub airline: String,
    /// Route label, e.g. "DEL → GOI"
    pub path: String,
    /// Departure/arrival window label
    pub time: String,
    /// Display price
    pub price: String,
    /// Promotional tag ("Recommended", "Cheapest", ...)
    pub tag: String,
    /// Optional urgency label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scarcity_msg: Option<String>,
}

/// A bookable hotel offered after a flight is chosen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelOption {
    /// Stable identifier used by `select_option`
    pub id: String,
    /// Hotel name
    pub name: String,
    /// Area or beach label
    pub location: String,
    /// Rating label, e.g. "4.9"
    pub rating: String,
    /// Display price per night
    pub price: String,
    /// Image reference for the presentation layer
    pub image: String,
    /// Promotional tag
    pub tag: String,
    /// Optional urgency label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scarcity_msg: Option<String>,
}

/// Category of an itinerary entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Flight,
    Transfer,
    Hotel,
    Activity,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flight => write!(f, "flight"),
            Self::Transfer => write!(f, "transfer"),
            Self::Hotel => write!(f, "hotel"),
            Self::Activity => write!(f, "activity"),
        }
    }
}

/// Badge color palette understood by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeColor {
    Green,
    Purple,
    Yellow,
    Red,
    Blue,
    Orange,
    White,
}

/// Short label attached to an itinerary event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub text: String,
    pub color: BadgeColor,
}

impl Badge {
    pub fn new(text: impl Into<String>, color: BadgeColor) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }
}

/// Map position in percentage space (0.0-100.0 on both axes)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: f32,
    pub y: f32,
}

/// A single entry in a day of the itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub title: String,
    pub subtitle: String,
    /// Start time label
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badges: Option<Vec<Badge>>,
    /// Why the planner picked this entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_reasoning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

impl PlanEvent {
    /// Create an event with only the mandatory fields set
    ///
    /// # Examples
    ///
    /// ```
    /// use orbit::catalog::{EventType, PlanEvent};
    ///
    /// let event = PlanEvent::new("2-1", EventType::Activity, "Old Goa Churches", "Heritage Walk", "09:00 AM")
    ///     .at(60.0, 40.0);
    /// assert_eq!(event.coordinates.map(|c| c.x), Some(60.0));
    /// ```
    pub fn new(
        id: impl Into<String>,
        event_type: EventType,
        title: impl Into<String>,
        subtitle: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            event_type,
            title: title.into(),
            subtitle: subtitle.into(),
            time: time.into(),
            duration: None,
            badges: None,
            ai_reasoning: None,
            price: None,
            coordinates: None,
        }
    }

    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    pub fn with_badge(mut self, text: impl Into<String>, color: BadgeColor) -> Self {
        self.badges
            .get_or_insert_with(Vec::new)
            .push(Badge::new(text, color));
        self
    }

    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.ai_reasoning = Some(reasoning.into());
        self
    }

    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.coordinates = Some(Coordinates { x, y });
        self
    }

    /// Flight entries can be swapped for an alternative from the catalog
    pub fn is_swappable(&self) -> bool {
        self.event_type == EventType::Flight
    }
}
