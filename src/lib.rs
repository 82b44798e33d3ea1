//! Orbit - conversational travel booking library
//!
//! This library provides the core of the Orbit travel concierge: a scripted
//! booking conversation that gathers trip details, offers flights and
//! hotels, and reveals a day-by-day itinerary once both are booked.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `catalog`: Reference data (flights, hotels, baseline and alternate itinerary)
//! - `ledger`: Append-only chat transcript
//! - `selection`: Committed flight and hotel
//! - `orchestrator`: Conversation state machine and deferred phases
//! - `script`: Recorded session scripts
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//! - `commands`: Terminal front-end
//!
//! # Example
//!
//! ```no_run
//! use orbit::{BookingOrchestrator, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let orchestrator = BookingOrchestrator::from_config(&config)?;
//!     orchestrator.submit_text("Goa").await?;
//!     orchestrator.settle().await?;
//!     println!("{}", orchestrator.snapshot().await.messages.len());
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod ledger;
pub mod orchestrator;
pub mod script;
pub mod selection;

// Re-export commonly used types
pub use catalog::Catalog;
pub use config::Config;
pub use error::{OrbitError, Result};
pub use ledger::{ChatMessage, OptionKind};
pub use orchestrator::{BookingOrchestrator, IntentOutcome, SessionSnapshot};
pub use script::SessionScript;

#[cfg(test)]
pub mod test_utils;
