//! Selection state: the flight and hotel the traveller has committed to

use crate::catalog::{FlightOption, HotelOption};
use serde::{Deserialize, Serialize};

/// At most one chosen flight and one chosen hotel
///
/// Commits always overwrite. An unresolved option id commits `None`, so a
/// previously chosen value can be cleared by a bad id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    pub selected_flight: Option<FlightOption>,
    pub selected_hotel: Option<HotelOption>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a flight, returning the previous one
    pub fn commit_flight(&mut self, flight: Option<FlightOption>) -> Option<FlightOption> {
        std::mem::replace(&mut self.selected_flight, flight)
    }

    /// Commit a hotel, returning the previous one
    pub fn commit_hotel(&mut self, hotel: Option<HotelOption>) -> Option<HotelOption> {
        std::mem::replace(&mut self.selected_hotel, hotel)
    }

    pub fn flight_id(&self) -> Option<&str> {
        self.selected_flight.as_ref().map(|f| f.id.as_str())
    }

    pub fn hotel_id(&self) -> Option<&str> {
        self.selected_hotel.as_ref().map(|h| h.id.as_str())
    }

    /// Whether choosing `candidate` would replace a different, existing flight
    ///
    /// # Examples
    ///
    /// ```
    /// use orbit::catalog::Catalog;
    /// use orbit::selection::SelectionState;
    ///
    /// let catalog = Catalog::builtin();
    /// let mut selection = SelectionState::new();
    /// assert!(!selection.is_flight_change(catalog.flight("opt1")));
    ///
    /// selection.commit_flight(catalog.flight("opt1").cloned());
    /// assert!(!selection.is_flight_change(catalog.flight("opt1")));
    /// assert!(selection.is_flight_change(catalog.flight("opt2")));
    /// ```
    pub fn is_flight_change(&self, candidate: Option<&FlightOption>) -> bool {
        match &self.selected_flight {
            Some(current) => candidate.map(|f| f.id.as_str()) != Some(current.id.as_str()),
            None => false,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.selected_flight.is_some() && self.selected_hotel.is_some()
    }
}
