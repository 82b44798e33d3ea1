//! Conversation ledger: the append-only chat transcript
//!
//! Messages are appended in emission order and never edited, reordered or
//! removed. Each message gets a monotonic ULID so ids sort the same way
//! the transcript does, even when two messages land in the same
//! millisecond.

use crate::catalog::{FlightOption, HotelOption};
use crate::error::{OrbitError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Generator;

/// Display timestamp for user messages
pub const USER_TIMESTAMP: &str = "Now";
/// Display timestamp for assistant messages
pub const ASSISTANT_TIMESTAMP: &str = "Just now";

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Assistant,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// Which catalog an option id refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionKind {
    Flight,
    Hotel,
}

impl OptionKind {
    /// Parse an option kind from a string
    ///
    /// # Examples
    ///
    /// ```
    /// use orbit::ledger::OptionKind;
    ///
    /// assert_eq!(OptionKind::parse_str("Hotel").unwrap(), OptionKind::Hotel);
    /// assert!(OptionKind::parse_str("train").is_err());
    /// ```
    pub fn parse_str(s: &str) -> std::result::Result<Self, String> {
        match s.to_lowercase().as_str() {
            "flight" | "flights" => Ok(Self::Flight),
            "hotel" | "hotels" => Ok(Self::Hotel),
            other => Err(format!("Unknown option kind: {}", other)),
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flight => write!(f, "flight"),
            Self::Hotel => write!(f, "hotel"),
        }
    }
}

/// Selectable options attached to an assistant message
///
/// The variant is the option kind, so a message can never carry options
/// without a kind or a kind without options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionSet {
    Flights(Vec<FlightOption>),
    Hotels(Vec<HotelOption>),
}

impl OptionSet {
    pub fn kind(&self) -> OptionKind {
        match self {
            Self::Flights(_) => OptionKind::Flight,
            Self::Hotels(_) => OptionKind::Hotel,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Flights(flights) => flights.len(),
            Self::Hotels(hotels) => hotels.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Option ids in display order
    pub fn ids(&self) -> Vec<&str> {
        match self {
            Self::Flights(flights) => flights.iter().map(|f| f.id.as_str()).collect(),
            Self::Hotels(hotels) => hotels.iter().map(|h| h.id.as_str()).collect(),
        }
    }
}

/// Wire shape of a message: `options` and `option_kind` travel together
#[derive(Serialize, Deserialize)]
struct ChatMessageRepr {
    id: String,
    sender: Sender,
    text: String,
    timestamp: String,
    created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    option_kind: Option<OptionKind>,
}

/// A single transcript entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ChatMessageRepr", into = "ChatMessageRepr")]
pub struct ChatMessage {
    pub id: String,
    pub sender: Sender,
    pub text: String,
    /// Display label ("Now", "Just now")
    pub timestamp: String,
    pub created_at: DateTime<Utc>,
    pub options: Option<OptionSet>,
}

impl ChatMessage {
    pub fn option_kind(&self) -> Option<OptionKind> {
        self.options.as_ref().map(OptionSet::kind)
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}

impl From<ChatMessage> for ChatMessageRepr {
    fn from(message: ChatMessage) -> Self {
        let option_kind = message.option_kind();
        let options = message.options.map(|set| match set {
            OptionSet::Flights(flights) => serde_json::to_value(flights),
            OptionSet::Hotels(hotels) => serde_json::to_value(hotels),
        });
        Self {
            id: message.id,
            sender: message.sender,
            text: message.text,
            timestamp: message.timestamp,
            created_at: message.created_at,
            // Option structs are plain strings; conversion cannot fail
            options: options.and_then(std::result::Result::ok),
            option_kind,
        }
    }
}

impl TryFrom<ChatMessageRepr> for ChatMessage {
    type Error = String;

    fn try_from(repr: ChatMessageRepr) -> std::result::Result<Self, Self::Error> {
        let options = match (repr.options, repr.option_kind) {
            (None, None) => None,
            (Some(value), Some(OptionKind::Flight)) => Some(OptionSet::Flights(
                serde_json::from_value(value).map_err(|e| e.to_string())?,
            )),
            (Some(value), Some(OptionKind::Hotel)) => Some(OptionSet::Hotels(
                serde_json::from_value(value).map_err(|e| e.to_string())?,
            )),
            (Some(_), None) => return Err("options present without option_kind".to_string()),
            (None, Some(_)) => return Err("option_kind present without options".to_string()),
        };
        Ok(Self {
            id: repr.id,
            sender: repr.sender,
            text: repr.text,
            timestamp: repr.timestamp,
            created_at: repr.created_at,
            options,
        })
    }
}

/// Append-only ordered list of chat messages
pub struct Ledger {
    messages: Vec<ChatMessage>,
    ids: Generator,
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("messages", &self.messages)
            .finish_non_exhaustive()
    }
}

impl Ledger {
    /// Create an empty ledger
    ///
    /// # Examples
    ///
    /// ```
    /// use orbit::ledger::Ledger;
    ///
    /// let mut ledger = Ledger::new();
    /// ledger.push_user("Goa").unwrap();
    /// ledger.push_assistant("Great choice.", None).unwrap();
    /// assert_eq!(ledger.len(), 2);
    /// assert!(ledger.messages()[0].id < ledger.messages()[1].id);
    /// ```
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            ids: Generator::new(),
        }
    }

    pub fn push_user(&mut self, text: impl Into<String>) -> Result<&ChatMessage> {
        self.push(Sender::User, text.into(), USER_TIMESTAMP, None)
    }

    pub fn push_assistant(
        &mut self,
        text: impl Into<String>,
        options: Option<OptionSet>,
    ) -> Result<&ChatMessage> {
        self.push(Sender::Assistant, text.into(), ASSISTANT_TIMESTAMP, options)
    }

    /// Seed an assistant message that uses the "Now" label (greetings)
    pub fn push_greeting(&mut self, text: impl Into<String>) -> Result<&ChatMessage> {
        self.push(Sender::Assistant, text.into(), USER_TIMESTAMP, None)
    }

    fn push(
        &mut self,
        sender: Sender,
        text: String,
        timestamp: &str,
        options: Option<OptionSet>,
    ) -> Result<&ChatMessage> {
        let id = self
            .ids
            .generate()
            .map_err(|e| OrbitError::Ledger(format!("Failed to generate message id: {}", e)))?;

        tracing::debug!(%sender, id = %id, with_options = options.is_some(), "Ledger append");

        self.messages.push(ChatMessage {
            id: id.to_string(),
            sender,
            text,
            timestamp: timestamp.to_string(),
            created_at: Utc::now(),
            options,
        });
        let index = self.messages.len() - 1;
        Ok(&self.messages[index])
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Messages appended after the first `offset` entries
    pub fn since(&self, offset: usize) -> &[ChatMessage] {
        self.messages.get(offset..).unwrap_or(&[])
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_ledger_appends_in_order_with_unique_ids() {
        let mut ledger = Ledger::new();
        for i in 0..50 {
            ledger.push_user(format!("message {}", i)).unwrap();
        }
        let ids: Vec<&str> = ledger.messages().iter().map(|m| m.id.as_str()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(ids, sorted);
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_timestamps_by_sender() {
        let mut ledger = Ledger::new();
        assert_eq!(ledger.push_user("hi").unwrap().timestamp, "Now");
        assert_eq!(
            ledger.push_assistant("hello", None).unwrap().timestamp,
            "Just now"
        );
        assert_eq!(ledger.push_greeting("welcome").unwrap().timestamp, "Now");
    }

    #[test]
    fn test_option_kind_follows_option_set() {
        let catalog = Catalog::builtin();
        let mut ledger = Ledger::new();
        let message = ledger
            .push_assistant("pick one", Some(OptionSet::Hotels(catalog.hotels.clone())))
            .unwrap();
        assert_eq!(message.option_kind(), Some(OptionKind::Hotel));
        assert_eq!(message.options.as_ref().map(OptionSet::len), Some(3));

        let plain = ledger.push_assistant("no options", None).unwrap();
        assert_eq!(plain.option_kind(), None);
    }

    #[test]
    fn test_since_returns_tail() {
        let mut ledger = Ledger::new();
        ledger.push_user("a").unwrap();
        ledger.push_user("b").unwrap();
        ledger.push_user("c").unwrap();
        let tail: Vec<&str> = ledger.since(1).iter().map(|m| m.text.as_str()).collect();
        assert_eq!(tail, vec!["b", "c"]);
        assert!(ledger.since(10).is_empty());
    }

    #[test]
    fn test_message_serializes_with_option_kind() {
        let catalog = Catalog::builtin();
        let mut ledger = Ledger::new();
        let message = ledger
            .push_assistant("flights", Some(OptionSet::Flights(catalog.flights.clone())))
            .unwrap()
            .clone();

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["option_kind"], "flight");
        assert_eq!(value["options"].as_array().map(Vec::len), Some(3));
        assert_eq!(value["options"][0]["id"], "opt1");

        let back: ChatMessage = serde_json::from_value(value).unwrap();
        assert_eq!(back, message);
    }

    #[test]
    fn test_message_without_kind_is_rejected() {
        let json = serde_json::json!({
            "id": "x",
            "sender": "assistant",
            "text": "t",
            "timestamp": "Now",
            "created_at": "2024-01-01T00:00:00Z",
            "options": []
        });
        let result: std::result::Result<ChatMessage, _> = serde_json::from_value(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_option_kind_parse() {
        assert_eq!(OptionKind::parse_str("FLIGHT").unwrap(), OptionKind::Flight);
        assert_eq!(OptionKind::parse_str("hotels").unwrap(), OptionKind::Hotel);
        assert!(OptionKind::parse_str("car").is_err());
    }
}
