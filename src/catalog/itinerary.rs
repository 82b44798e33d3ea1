//! Day-indexed itineraries and the replanning overlay
//!
//! The alternate itinerary is never stored as a full copy. It is the
//! baseline with a small set of days replaced, so any day that is not
//! overridden resolves to the very same events in both variants.

use super::types::PlanEvent;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Mapping from day number (1-based) to the ordered events of that day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Itinerary {
    days: BTreeMap<u32, Vec<PlanEvent>>,
}

impl Itinerary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion of a whole day
    pub fn with_day(mut self, day: u32, events: Vec<PlanEvent>) -> Self {
        self.days.insert(day, events);
        self
    }

    /// Events for `day`, or `None` when the day is absent
    pub fn get(&self, day: u32) -> Option<&[PlanEvent]> {
        self.days.get(&day).map(Vec::as_slice)
    }

    /// Day numbers in ascending order
    pub fn days(&self) -> impl Iterator<Item = u32> + '_ {
        self.days.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &[PlanEvent])> {
        self.days.iter().map(|(day, events)| (*day, events.as_slice()))
    }
}

/// Which itinerary dataset is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanVariant {
    /// The plan generated from the first flight choice
    Baseline,
    /// The plan after the flight was changed
    Alternate,
}

impl PlanVariant {
    /// Variant selected by the orchestrator's replanning flag
    pub fn for_replanning(replanning: bool) -> Self {
        if replanning {
            Self::Alternate
        } else {
            Self::Baseline
        }
    }
}

impl fmt::Display for PlanVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Baseline => write!(f, "baseline"),
            Self::Alternate => write!(f, "alternate"),
        }
    }
}

/// Baseline itinerary plus the day overrides that make up the alternate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItineraryPlan {
    pub baseline: Itinerary,
    #[serde(default)]
    pub overrides: Itinerary,
}

impl ItineraryPlan {
    pub fn new(baseline: Itinerary, overrides: Itinerary) -> Self {
        Self {
            baseline,
            overrides,
        }
    }

    /// Events for `day` in the given variant
    ///
    /// Absent days yield an empty slice rather than an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use orbit::catalog::{Catalog, PlanVariant};
    ///
    /// let catalog = Catalog::builtin();
    /// let plan = &catalog.itinerary;
    /// assert_eq!(plan.day(PlanVariant::Baseline, 1).len(), 5);
    /// assert_eq!(plan.day(PlanVariant::Alternate, 1).len(), 4);
    /// assert!(plan.day(PlanVariant::Baseline, 9).is_empty());
    /// ```
    pub fn day(&self, variant: PlanVariant, day: u32) -> &[PlanEvent] {
        let overridden = match variant {
            PlanVariant::Alternate => self.overrides.get(day),
            PlanVariant::Baseline => None,
        };
        overridden
            .or_else(|| self.baseline.get(day))
            .unwrap_or(&[])
    }

    /// Number of days in the trip (overrides never add days)
    pub fn total_days(&self) -> u32 {
        self.baseline.days().max().unwrap_or(0)
    }

    /// Whether `day` differs between the two variants
    pub fn is_overridden(&self, day: u32) -> bool {
        self.overrides.get(day).is_some()
    }
}
