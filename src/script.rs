//! Session scripts: recorded intents replayed against an orchestrator
//!
//! A script is a YAML or JSON document listing the intents a user would
//! send, in order:
//!
//! ```yaml
//! name: Goa weekend
//! intents:
//!   - intent: say
//!     text: Goa
//!   - intent: select
//!     id: opt1
//!   - intent: day
//!     day: 2
//! ```
//!
//! By default the runner waits for every reply before sending the next
//! intent. Scripts with `overlap: true` fire intents back-to-back and only
//! wait at explicit `settle` intents, so pending phases interleave.

use crate::error::{OrbitError, Result};
use crate::ledger::OptionKind;
use crate::orchestrator::{BookingOrchestrator, IntentOutcome, SessionSnapshot};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A named, ordered list of intents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionScript {
    /// Script name (title)
    pub name: String,
    /// Optional script description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fire intents without waiting for replies
    #[serde(default)]
    pub overlap: bool,
    /// Intents in the order they are sent
    pub intents: Vec<Intent>,
}

/// One user action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    /// Free text
    Say { text: String },
    /// Pick an offered option; the kind is inferred from the catalog when omitted
    Select {
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        kind: Option<OptionKind>,
    },
    /// Ask for the flight list again
    AlternateFlights,
    /// Switch the dashboard day
    Day { day: u32 },
    /// Wait for every pending phase
    Settle,
}

impl Intent {
    fn name(&self) -> &'static str {
        match self {
            Self::Say { .. } => "say",
            Self::Select { .. } => "select",
            Self::AlternateFlights => "alternate_flights",
            Self::Day { .. } => "day",
            Self::Settle => "settle",
        }
    }
}

/// Counts gathered while a script runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScriptReport {
    pub sent: usize,
    pub ignored: usize,
}

impl SessionScript {
    /// Parse a script from a file.
    ///
    /// Supports `.yaml`, `.yml` and `.json` extensions.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            OrbitError::Script(format!(
                "Failed to read script file {}: {}",
                path.display(),
                e
            ))
        })?;

        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| OrbitError::Script("Script file has no extension".to_string()))?;

        match extension {
            "yaml" | "yml" => Self::from_yaml(&content),
            "json" => Self::from_json(&content),
            _ => Err(OrbitError::Script(format!(
                "Unsupported script format: {}",
                extension
            ))
            .into()),
        }
    }

    /// Parse YAML script content
    pub fn from_yaml(content: &str) -> Result<Self> {
        let script: Self = serde_yaml::from_str(content).map_err(OrbitError::Yaml)?;
        script.validate()?;
        Ok(script)
    }

    /// Parse JSON script content
    pub fn from_json(content: &str) -> Result<Self> {
        let script: Self = serde_json::from_str(content).map_err(OrbitError::Serialization)?;
        script.validate()?;
        Ok(script)
    }

    /// Check that the script has a name, at least one intent and no blank ids
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(OrbitError::Script("Script name cannot be empty".to_string()).into());
        }
        if self.intents.is_empty() {
            return Err(OrbitError::Script(format!(
                "Script '{}' has no intents",
                self.name
            ))
            .into());
        }
        for (index, intent) in self.intents.iter().enumerate() {
            if let Intent::Select { id, .. } = intent {
                if id.trim().is_empty() {
                    return Err(OrbitError::Script(format!(
                        "Intent {} selects an empty option id",
                        index + 1
                    ))
                    .into());
                }
            }
        }
        Ok(())
    }

    /// Send every intent to `orchestrator` and return the settled session
    ///
    /// # Errors
    ///
    /// Returns `OrbitError::Script` if a select intent omits its kind and
    /// the id is in neither catalog list, or any error from the
    /// orchestrator itself
    pub async fn run(
        &self,
        orchestrator: &BookingOrchestrator,
    ) -> Result<(SessionSnapshot, ScriptReport)> {
        tracing::info!(
            script = %self.name,
            intents = self.intents.len(),
            overlap = self.overlap,
            "Running session script"
        );
        let mut report = ScriptReport::default();

        for (index, intent) in self.intents.iter().enumerate() {
            tracing::debug!(index, intent = intent.name(), "Sending intent");
            let outcome = match intent {
                Intent::Say { text } => Some(orchestrator.submit_text(text).await?),
                Intent::Select { id, kind } => {
                    let kind = match kind {
                        Some(kind) => *kind,
                        None => orchestrator.catalog().kind_of(id).ok_or_else(|| {
                            OrbitError::Script(format!(
                                "Intent {}: cannot tell whether '{}' is a flight or a hotel",
                                index + 1,
                                id
                            ))
                        })?,
                    };
                    Some(orchestrator.select_option(id, kind).await?)
                }
                Intent::AlternateFlights => Some(orchestrator.request_alternate_flights().await?),
                Intent::Day { day } => {
                    orchestrator.set_current_day(*day).await;
                    None
                }
                Intent::Settle => {
                    orchestrator.settle().await?;
                    None
                }
            };

            match outcome {
                Some(IntentOutcome::Accepted) => report.sent += 1,
                Some(IntentOutcome::Ignored) => report.ignored += 1,
                None => {}
            }

            if !self.overlap {
                orchestrator.settle().await?;
            }
        }

        orchestrator.settle().await?;
        Ok((orchestrator.snapshot().await, report))
    }
}
