//! Booking orchestrator: the conversation state machine
//!
//! The orchestrator owns the ledger, the selection state and the step/flag
//! record of one session. Presentation layers drive it with four intents
//! (`submit_text`, `select_option`, `request_alternate_flights`,
//! `set_current_day`) and re-render from [`BookingOrchestrator::snapshot`]
//! whenever the revision published on [`BookingOrchestrator::subscribe`]
//! changes.
//!
//! Intents mutate state immediately and schedule their replies as deferred
//! [`Phase`]s. Under [`ReentryPolicy::Permissive`] every scheduled phase
//! fires, so overlapping intents interleave in deadline order. Under
//! [`ReentryPolicy::Guarded`] each conversational intent starts a new
//! generation and phases from older generations are dropped when they
//! fire.
//!
//! # Example
//!
//! ```
//! use orbit::config::{LatencyConfig, OrchestratorConfig};
//! use orbit::ledger::OptionKind;
//! use orbit::orchestrator::BookingOrchestrator;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> anyhow::Result<()> {
//! let config = OrchestratorConfig {
//!     latency: LatencyConfig::instant(),
//!     ..Default::default()
//! };
//! let orchestrator = BookingOrchestrator::with_builtin_catalog(config)?;
//!
//! for answer in ["Goa", "Delhi", "June", "2 people", "Relaxed"] {
//!     orchestrator.submit_text(answer).await?;
//!     orchestrator.settle().await?;
//! }
//! orchestrator.select_option("opt1", OptionKind::Flight).await?;
//! orchestrator.settle().await?;
//! orchestrator.select_option("h1", OptionKind::Hotel).await?;
//! orchestrator.settle().await?;
//!
//! let snapshot = orchestrator.snapshot().await;
//! assert!(snapshot.dashboard_visible);
//! assert_eq!(snapshot.visible_events.len(), 5);
//! # Ok(())
//! # }
//! ```

pub mod dialogue;
mod metrics;
pub mod phase;
pub mod state;

pub use dialogue::{DialoguePhase, ScriptedReply};
pub use phase::Phase;
pub use state::{OrchestratorState, SessionSnapshot};

use crate::catalog::{Catalog, PlanEvent};
use crate::config::{Config, LatencyConfig, OrchestratorConfig, ReentryPolicy};
use crate::error::Result;
use crate::ledger::{Ledger, OptionKind, OptionSet};
use crate::selection::SelectionState;
use dialogue::{
    flight_switch_text, hotel_confirmed_text, ALTERNATE_FLIGHTS, ALTERNATE_REQUEST, FLIGHTS_FOUND,
    GREETING, HOTELS_OFFERED, LABEL_CURATING_HOTELS, LABEL_FINALIZING, LABEL_RECALCULATING,
    LABEL_RETRIEVING_FLIGHTS, LABEL_SCANNING, LISTENING,
};
use phase::PhaseTasks;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::time::Instant;

/// Whether an intent reached the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentOutcome {
    Accepted,
    /// Dropped before touching any state (e.g. blank text)
    Ignored,
}

/// Mutable session data, guarded by a single lock
#[derive(Debug)]
struct Session {
    state: OrchestratorState,
    ledger: Ledger,
    selection: SelectionState,
    /// Bumped by every conversational intent
    generation: u64,
}

impl Session {
    fn new() -> Result<Self> {
        let mut ledger = Ledger::new();
        ledger.push_greeting(GREETING)?;
        Ok(Self {
            state: OrchestratorState::default(),
            ledger,
            selection: SelectionState::new(),
            generation: 0,
        })
    }

    fn begin_intent(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }
}

struct Inner {
    catalog: Arc<Catalog>,
    latency: LatencyConfig,
    policy: ReentryPolicy,
    session: Mutex<Session>,
    tasks: PhaseTasks,
    revision: watch::Sender<u64>,
}

/// Handle to one booking session
///
/// Cloning is cheap and every clone drives the same session.
#[derive(Clone)]
pub struct BookingOrchestrator {
    inner: Arc<Inner>,
}

impl fmt::Debug for BookingOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BookingOrchestrator")
            .field("policy", &self.inner.policy)
            .field("latency", &self.inner.latency)
            .field("pending_phases", &self.inner.tasks.pending())
            .finish_non_exhaustive()
    }
}

impl BookingOrchestrator {
    /// Start a new session over `catalog`
    ///
    /// # Errors
    ///
    /// Fails only if the greeting cannot be appended to the ledger
    pub fn new(catalog: Arc<Catalog>, config: OrchestratorConfig) -> Result<Self> {
        let (revision, _) = watch::channel(0);
        tracing::debug!(policy = %config.reentry_policy, "Starting booking session");
        Ok(Self {
            inner: Arc::new(Inner {
                catalog,
                latency: config.latency,
                policy: config.reentry_policy,
                session: Mutex::new(Session::new()?),
                tasks: PhaseTasks::default(),
                revision,
            }),
        })
    }

    pub fn with_builtin_catalog(config: OrchestratorConfig) -> Result<Self> {
        Self::new(Arc::new(Catalog::builtin()), config)
    }

    /// Build a session from application configuration, loading the catalog
    ///
    /// # Errors
    ///
    /// Returns `OrbitError::Catalog` if the configured catalog cannot be
    /// loaded or fails validation
    pub fn from_config(config: &Config) -> Result<Self> {
        let catalog = Catalog::load(config.catalog.path.as_deref())?;
        Self::new(Arc::new(catalog), config.orchestrator.clone())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    pub fn reentry_policy(&self) -> ReentryPolicy {
        self.inner.policy
    }

    /// Receiver that observes a new revision after every state change
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.revision.subscribe()
    }

    /// Submit free text; only its presence matters, never its content
    ///
    /// Blank or whitespace-only text is ignored. Otherwise the text is
    /// appended as a user message, `thinking` is set and `step` advances.
    /// The scripted reply for the new step follows after the standard
    /// latency; the step after the vibe prompt instead runs the two-phase
    /// flight scan.
    pub async fn submit_text(&self, text: &str) -> Result<IntentOutcome> {
        if text.trim().is_empty() {
            tracing::debug!("Ignoring blank text submission");
            metrics::intent_ignored("submit_text");
            return Ok(IntentOutcome::Ignored);
        }
        metrics::intent_accepted("submit_text");

        {
            let mut session = self.inner.session.lock().await;
            let generation = session.begin_intent();
            session.ledger.push_user(text)?;
            session.state.start_thinking(None);
            session.state.step += 1;
            let step = session.state.step;

            if ScriptedReply::for_step(step) == ScriptedReply::FlightScan {
                session.state.phase = DialoguePhase::AwaitingScan;
            }
            tracing::info!(step, generation, "Text submitted");

            self.schedule(Phase::Reply { step }, self.inner.latency.standard(), generation);
        }
        self.publish();
        Ok(IntentOutcome::Accepted)
    }

    /// Choose an option previously offered in the conversation
    ///
    /// Unknown ids are not an error: the selection is committed as `None`
    /// and the follow-up message names a placeholder instead.
    pub async fn select_option(&self, option_id: &str, kind: OptionKind) -> Result<IntentOutcome> {
        metrics::intent_accepted(match kind {
            OptionKind::Flight => "select_flight",
            OptionKind::Hotel => "select_hotel",
        });

        {
            let mut session = self.inner.session.lock().await;
            let generation = session.begin_intent();

            match kind {
                OptionKind::Flight => {
                    let flight = self.inner.catalog.flight(option_id).cloned();
                    if flight.is_none() {
                        self.warn_unresolved(option_id, kind);
                    }

                    if session.selection.is_flight_change(flight.as_ref()) {
                        tracing::info!(
                            from = ?session.selection.flight_id(),
                            to = option_id,
                            "Flight change requested"
                        );
                        session.state.start_thinking(Some(LABEL_RECALCULATING));
                        self.schedule(
                            Phase::FlightChanged { flight },
                            self.inner.latency.replan(),
                            generation,
                        );
                    } else {
                        tracing::info!(flight = option_id, "Flight selected");
                        session.selection.commit_flight(flight);
                        session.state.start_thinking(Some(LABEL_CURATING_HOTELS));
                        self.schedule(
                            Phase::HotelsPresented,
                            self.inner.latency.flight_confirm(),
                            generation,
                        );
                    }
                }
                OptionKind::Hotel => {
                    let hotel = self.inner.catalog.hotel(option_id).cloned();
                    if hotel.is_none() {
                        self.warn_unresolved(option_id, kind);
                    }
                    tracing::info!(hotel = option_id, "Hotel selected");

                    let hotel_name = hotel.as_ref().map(|h| h.name.clone());
                    session.selection.commit_hotel(hotel);
                    session.state.start_thinking(Some(LABEL_FINALIZING));
                    self.schedule(
                        Phase::HotelConfirmed { hotel_name },
                        self.inner.latency.hotel_confirm(),
                        generation,
                    );
                }
            }
        }
        self.publish();
        Ok(IntentOutcome::Accepted)
    }

    /// Ask to see the flight catalog again (the itinerary swap action)
    ///
    /// Leaves `step`, `replanning` and the selection untouched.
    pub async fn request_alternate_flights(&self) -> Result<IntentOutcome> {
        metrics::intent_accepted("request_alternate_flights");

        {
            let mut session = self.inner.session.lock().await;
            let generation = session.begin_intent();
            session.ledger.push_user(ALTERNATE_REQUEST)?;
            session.state.start_thinking(Some(LABEL_RETRIEVING_FLIGHTS));
            tracing::info!(generation, "Alternate flights requested");
            self.schedule(
                Phase::AlternateFlights,
                self.inner.latency.alternate_flights(),
                generation,
            );
        }
        self.publish();
        Ok(IntentOutcome::Accepted)
    }

    /// Switch the dashboard to `day`; no bounds check, unknown days show nothing
    pub async fn set_current_day(&self, day: u32) {
        {
            let mut session = self.inner.session.lock().await;
            session.state.current_day = day;
        }
        tracing::debug!(day, "Current day changed");
        self.publish();
    }

    /// Events of `day` in the currently active variant
    ///
    /// Unlike `visible_events` this ignores dashboard visibility.
    pub async fn active_itinerary(&self, day: u32) -> Vec<PlanEvent> {
        let variant = self.inner.session.lock().await.state.plan_variant();
        self.inner.catalog.itinerary.day(variant, day).to_vec()
    }

    /// Copy of the step/flag record
    pub async fn state(&self) -> OrchestratorState {
        self.inner.session.lock().await.state.clone()
    }

    /// Consistent view of the whole session
    pub async fn snapshot(&self) -> SessionSnapshot {
        let session = self.inner.session.lock().await;
        let state = &session.state;
        let variant = state.plan_variant();
        let visible_events = if state.dashboard_visible {
            self.inner
                .catalog
                .itinerary
                .day(variant, state.current_day)
                .to_vec()
        } else {
            Vec::new()
        };

        SessionSnapshot {
            messages: session.ledger.messages().to_vec(),
            thinking: state.thinking,
            thinking_label: state.thinking_label.clone(),
            step: state.step,
            phase: state.phase,
            replanning: state.replanning,
            generating_plan: state.generating_plan,
            dashboard_visible: state.dashboard_visible,
            current_day: state.current_day,
            total_days: self.inner.catalog.total_days(),
            plan_variant: variant,
            selected_flight: session.selection.selected_flight.clone(),
            selected_hotel: session.selection.selected_hotel.clone(),
            visible_events,
        }
    }

    /// Number of deferred phases still waiting to fire
    pub fn pending_phases(&self) -> usize {
        self.inner.tasks.pending()
    }

    /// Wait until every scheduled phase, including follow-ups, has run
    pub async fn settle(&self) -> Result<()> {
        self.inner.tasks.settle().await
    }

    /// Drop all pending phases; the session keeps its current state
    ///
    /// Returns how many phases were cancelled.
    pub fn shutdown(&self) -> usize {
        let cancelled = self.inner.tasks.abort_all();
        metrics::phases_aborted(cancelled);
        tracing::debug!(cancelled, "Aborted pending phases");
        cancelled
    }

    fn warn_unresolved(&self, option_id: &str, kind: OptionKind) {
        tracing::warn!(option_id, %kind, "Option id not found in catalog; committing none");
        metrics::option_unresolved(kind);
    }

    fn publish(&self) {
        self.inner.revision.send_modify(|revision| *revision += 1);
    }

    fn schedule(&self, phase: Phase, delay: Duration, generation: u64) {
        let deadline = Instant::now() + delay;
        let this = self.clone();
        tracing::debug!(%phase, delay_ms = delay.as_millis() as u64, generation, "Phase scheduled");
        metrics::phase_scheduled();

        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let name = phase.name();
            if let Err(e) = this.run_phase(phase, generation).await {
                tracing::error!(phase = name, "Phase failed: {:#}", e);
            }
        });
        self.inner.tasks.track(handle);
    }

    async fn run_phase(&self, phase: Phase, generation: u64) -> Result<()> {
        let name = phase.name();
        {
            let mut session = self.inner.session.lock().await;

            if self.inner.policy == ReentryPolicy::Guarded
                && phase.is_supersedable()
                && session.generation != generation
            {
                tracing::debug!(
                    phase = name,
                    scheduled = generation,
                    current = session.generation,
                    "Dropping stale phase"
                );
                metrics::phase_stale(name);
                return Ok(());
            }
            metrics::phase_fired(name);
            tracing::debug!(%phase, "Phase fired");

            self.apply_phase(&mut session, phase, generation)?;
        }
        self.publish();
        Ok(())
    }

    fn apply_phase(&self, session: &mut Session, phase: Phase, generation: u64) -> Result<()> {
        let catalog = &self.inner.catalog;
        let latency = &self.inner.latency;

        match phase {
            Phase::Reply { step } => {
                session.state.stop_thinking();
                match ScriptedReply::for_step(step) {
                    ScriptedReply::Prompt(text) => {
                        session.ledger.push_assistant(text, None)?;
                    }
                    ScriptedReply::Listening => {
                        session.ledger.push_assistant(LISTENING, None)?;
                    }
                    ScriptedReply::FlightScan => {
                        session.state.start_thinking(Some(LABEL_SCANNING));
                        session.state.phase = DialoguePhase::Scanning;
                        self.schedule(Phase::ScanComplete, latency.flight_scan(), generation);
                    }
                }
            }
            Phase::ScanComplete => {
                session.state.stop_thinking();
                session
                    .ledger
                    .push_assistant(FLIGHTS_FOUND, Some(OptionSet::Flights(catalog.flights.clone())))?;
                session.state.phase = DialoguePhase::FlightsPresented;
            }
            Phase::HotelsPresented => {
                session.state.stop_thinking();
                session
                    .ledger
                    .push_assistant(HOTELS_OFFERED, Some(OptionSet::Hotels(catalog.hotels.clone())))?;
            }
            Phase::FlightChanged { flight } => {
                session.state.stop_thinking();
                let text = flight_switch_text(flight.as_ref().map(|f| f.airline.as_str()));
                session.ledger.push_assistant(text, None)?;
                session.selection.commit_flight(flight);
                session.state.replanning = true;
                tracing::info!("Replanning with alternate itinerary");
            }
            Phase::HotelConfirmed { hotel_name } => {
                session.state.stop_thinking();
                let text = hotel_confirmed_text(hotel_name.as_deref(), catalog.total_days());
                session.ledger.push_assistant(text, None)?;
                self.schedule(Phase::GenerationStarted, latency.generation_pause(), generation);
            }
            Phase::GenerationStarted => {
                session.state.generating_plan = true;
                self.schedule(Phase::GenerationFinished, latency.generation(), generation);
            }
            Phase::GenerationFinished => {
                session.state.generating_plan = false;
                session.state.dashboard_visible = true;
                tracing::info!(variant = %session.state.plan_variant(), "Itinerary ready");
            }
            Phase::AlternateFlights => {
                session.state.stop_thinking();
                session.ledger.push_assistant(
                    ALTERNATE_FLIGHTS,
                    Some(OptionSet::Flights(catalog.flights.clone())),
                )?;
            }
        }
        Ok(())
    }
}
