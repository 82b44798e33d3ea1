//! Deferred orchestrator phases and the task set that tracks them
//!
//! Every "thinking" interval is a [`Phase`] scheduled on the tokio runtime
//! with a fixed deadline. Deadlines are computed when the phase is
//! scheduled, not when the task is first polled, so the order in which
//! phases fire matches the order of their deadlines.

use super::dialogue::FLIGHT_SCAN_STEP;
use crate::catalog::FlightOption;
use crate::error::{OrbitError, Result};
use std::fmt;
use std::sync::{Mutex, PoisonError};
use tokio::task::JoinHandle;

/// A unit of deferred work, run once its latency has elapsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Reply to the text submission that produced `step`
    Reply { step: u32 },
    /// End of the flight scan: present the flight catalog
    ScanComplete,
    /// First (or repeated) flight choice: present the hotel catalog
    HotelsPresented,
    /// A different flight replaced the committed one
    FlightChanged { flight: Option<FlightOption> },
    /// Hotel committed: confirm and schedule itinerary generation
    HotelConfirmed { hotel_name: Option<String> },
    /// Generation loader starts
    GenerationStarted,
    /// Generation done: dashboard becomes visible
    GenerationFinished,
    /// Re-present flights after an explicit request
    AlternateFlights,
}

impl Phase {
    /// Stable name used in logs and metric labels
    pub fn name(&self) -> &'static str {
        match self {
            Self::Reply { .. } => "reply",
            Self::ScanComplete => "scan_complete",
            Self::HotelsPresented => "hotels_presented",
            Self::FlightChanged { .. } => "flight_changed",
            Self::HotelConfirmed { .. } => "hotel_confirmed",
            Self::GenerationStarted => "generation_started",
            Self::GenerationFinished => "generation_finished",
            Self::AlternateFlights => "alternate_flights",
        }
    }

    /// Whether a newer intent may drop this phase under the guarded policy
    ///
    /// The flight scan chain always runs: nothing else moves the dialogue
    /// past `AwaitingScan`.
    pub fn is_supersedable(&self) -> bool {
        match self {
            Self::Reply { step } => *step != FLIGHT_SCAN_STEP,
            Self::ScanComplete => false,
            _ => true,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reply { step } => write!(f, "reply(step={})", step),
            other => write!(f, "{}", other.name()),
        }
    }
}

/// Join handles of every phase task spawned by one orchestrator
#[derive(Debug, Default)]
pub(crate) struct PhaseTasks {
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl PhaseTasks {
    pub(crate) fn track(&self, handle: JoinHandle<()>) {
        let mut handles = self.handles.lock().unwrap_or_else(PoisonError::into_inner);
        handles.retain(|h| !h.is_finished());
        handles.push(handle);
    }

    /// Number of phases that have not completed yet
    pub(crate) fn pending(&self) -> usize {
        self.handles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|h| !h.is_finished())
            .count()
    }

    /// Wait until no phase is pending, including phases scheduled meanwhile
    ///
    /// # Errors
    ///
    /// Returns `OrbitError::Phase` if a phase task panicked
    pub(crate) async fn settle(&self) -> Result<()> {
        loop {
            let drained: Vec<JoinHandle<()>> = {
                let mut handles = self.handles.lock().unwrap_or_else(PoisonError::into_inner);
                handles.drain(..).collect()
            };
            if drained.is_empty() {
                return Ok(());
            }
            for handle in drained {
                handle
                    .await
                    .map_err(|e| OrbitError::Phase(e.to_string()))?;
            }
        }
    }

    /// Abort every pending phase (session teardown)
    ///
    /// Returns how many phases were cancelled before they fired.
    pub(crate) fn abort_all(&self) -> usize {
        let mut handles = self.handles.lock().unwrap_or_else(PoisonError::into_inner);
        let mut cancelled = 0;
        for handle in handles.drain(..) {
            if !handle.is_finished() {
                cancelled += 1;
            }
            handle.abort();
        }
        cancelled
    }
}
