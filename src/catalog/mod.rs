//! Catalog store: immutable reference data for a booking session
//!
//! The catalog holds the flight and hotel options offered in the
//! conversation and the itinerary plan revealed once both are booked.
//! It is built once at startup, validated, and then shared read-only
//! (behind an `Arc`) with every orchestrator instance.

mod builtin;
pub mod itinerary;
pub mod types;

pub use itinerary::{Itinerary, ItineraryPlan, PlanVariant};
pub use types::{Badge, BadgeColor, Coordinates, EventType, FlightOption, HotelOption, PlanEvent};

use crate::error::{OrbitError, Result};
use crate::ledger::OptionKind;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Reference data supplied to the orchestrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub flights: Vec<FlightOption>,
    pub hotels: Vec<HotelOption>,
    pub itinerary: ItineraryPlan,
}

impl Catalog {
    /// The Goa dataset compiled into the binary
    ///
    /// # Examples
    ///
    /// ```
    /// use orbit::catalog::Catalog;
    ///
    /// let catalog = Catalog::builtin();
    /// assert_eq!(catalog.flights.len(), 3);
    /// assert_eq!(catalog.hotels.len(), 3);
    /// assert_eq!(catalog.total_days(), 4);
    /// assert!(catalog.validate().is_ok());
    /// ```
    pub fn builtin() -> Self {
        Self {
            flights: builtin::flights(),
            hotels: builtin::hotels(),
            itinerary: builtin::itinerary(),
        }
    }

    /// Load a catalog from a `.yaml`, `.yml` or `.json` file and validate it
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            OrbitError::Catalog(format!(
                "Failed to read catalog file {}: {}",
                path.display(),
                e
            ))
        })?;

        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| OrbitError::Catalog("Catalog file has no extension".to_string()))?;

        match extension {
            "yaml" | "yml" => Self::from_yaml(&content),
            "json" => Self::from_json(&content),
            other => Err(OrbitError::Catalog(format!("Unsupported catalog format: {}", other)).into()),
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let catalog: Catalog = serde_yaml::from_str(content).map_err(OrbitError::Yaml)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(content).map_err(OrbitError::Serialization)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Resolve either the configured catalog file or the built-in dataset
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                tracing::info!("Loading catalog from {}", path.display());
                Self::from_file(path)
            }
            None => {
                tracing::debug!("Using built-in catalog");
                Ok(Self::builtin())
            }
        }
    }

    /// Check structural invariants of the reference data
    ///
    /// # Errors
    ///
    /// Returns `OrbitError::Catalog` if option lists are empty or contain
    /// duplicate ids, if baseline days are not `1..=N` without gaps, if an
    /// override targets a day the baseline does not have, or if a day
    /// repeats an event id.
    pub fn validate(&self) -> Result<()> {
        if self.flights.is_empty() {
            return Err(OrbitError::Catalog("Catalog has no flight options".to_string()).into());
        }
        if self.hotels.is_empty() {
            return Err(OrbitError::Catalog("Catalog has no hotel options".to_string()).into());
        }

        ensure_unique("flight", self.flights.iter().map(|f| f.id.as_str()))?;
        ensure_unique("hotel", self.hotels.iter().map(|h| h.id.as_str()))?;

        let baseline = &self.itinerary.baseline;
        if baseline.is_empty() {
            return Err(OrbitError::Catalog("Baseline itinerary has no days".to_string()).into());
        }
        for (expected, day) in (1u32..).zip(baseline.days()) {
            if day != expected {
                return Err(OrbitError::Catalog(format!(
                    "Baseline itinerary days must be contiguous from 1; expected day {}, found day {}",
                    expected, day
                ))
                .into());
            }
        }

        for day in self.itinerary.overrides.days() {
            if baseline.get(day).is_none() {
                return Err(OrbitError::Catalog(format!(
                    "Override for day {} has no matching baseline day",
                    day
                ))
                .into());
            }
        }

        for (label, itinerary) in [("baseline", baseline), ("override", &self.itinerary.overrides)] {
            for (day, events) in itinerary.iter() {
                ensure_unique(
                    &format!("{} day {} event", label, day),
                    events.iter().map(|e| e.id.as_str()),
                )?;
            }
        }

        Ok(())
    }

    pub fn flight(&self, id: &str) -> Option<&FlightOption> {
        self.flights.iter().find(|f| f.id == id)
    }

    pub fn hotel(&self, id: &str) -> Option<&HotelOption> {
        self.hotels.iter().find(|h| h.id == id)
    }

    pub fn total_days(&self) -> u32 {
        self.itinerary.total_days()
    }

    /// Which list holds `id`; flights win if both do
    pub fn kind_of(&self, id: &str) -> Option<OptionKind> {
        if self.flight(id).is_some() {
            Some(OptionKind::Flight)
        } else if self.hotel(id).is_some() {
            Some(OptionKind::Hotel)
        } else {
            None
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn ensure_unique<'a>(what: &str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(OrbitError::Catalog(format!("Duplicate {} id: {}", what, id)).into());
        }
    }
    Ok(())
}
