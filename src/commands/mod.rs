/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes three top-level command modules:

- `chat`    — Interactive booking conversation
- `run`     — Replay a session script
- `inspect` — Print the catalog and itinerary plan

The handlers only drive a `BookingOrchestrator` and render what it
publishes; all booking behavior lives in the library.
*/

use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::Result;
use crate::ledger::ChatMessage;
use crate::orchestrator::{BookingOrchestrator, SessionSnapshot};

// Special commands parser for booking actions
pub mod special_commands;

// Tables and colored output
pub mod render;

/// Something the chat view has to print after a state change
#[derive(Debug, Clone, PartialEq)]
pub enum ViewUpdate {
    Message(ChatMessage),
    Thinking(String),
    Generating,
    Dashboard,
}

/// Tracks what the terminal has already shown so only changes are printed
#[derive(Debug, Clone)]
pub struct ChatView {
    rendered: usize,
    show_thinking: bool,
    last_label: Option<String>,
    generating: bool,
    dashboard: bool,
}

impl ChatView {
    pub fn new(show_thinking: bool) -> Self {
        Self {
            rendered: 0,
            show_thinking,
            last_label: None,
            generating: false,
            dashboard: false,
        }
    }

    /// Diff `snapshot` against what was shown before
    ///
    /// User messages are skipped; the prompt line already shows them.
    pub fn updates(&mut self, snapshot: &SessionSnapshot) -> Vec<ViewUpdate> {
        let mut updates: Vec<ViewUpdate> = snapshot
            .messages
            .iter()
            .skip(self.rendered)
            .filter(|m| !m.is_user())
            .cloned()
            .map(ViewUpdate::Message)
            .collect();
        self.rendered = snapshot.messages.len();

        let label = snapshot.thinking_display().map(str::to_string);
        if self.show_thinking && label.is_some() && label != self.last_label {
            if let Some(text) = &label {
                updates.push(ViewUpdate::Thinking(text.clone()));
            }
        }
        self.last_label = label;

        if snapshot.generating_plan && !self.generating {
            updates.push(ViewUpdate::Generating);
        }
        self.generating = snapshot.generating_plan;

        if snapshot.dashboard_visible && !self.dashboard {
            updates.push(ViewUpdate::Dashboard);
        }
        self.dashboard = snapshot.dashboard_visible;

        updates
    }

    pub fn print(&mut self, snapshot: &SessionSnapshot) {
        for update in self.updates(snapshot) {
            match update {
                ViewUpdate::Message(message) => render::print_message(&message),
                ViewUpdate::Thinking(label) => render::print_thinking(&label),
                ViewUpdate::Generating => render::print_generating(),
                ViewUpdate::Dashboard => render::print_dashboard(snapshot),
            }
        }
    }
}

/// Apply the `chat.color` setting to all terminal output
fn apply_color_setting(config: &Config) {
    if !config.chat.color {
        colored::control::set_override(false);
    }
}

// Chat command handler
pub mod chat {
    //! Interactive chat mode handler.
    //!
    //! Creates a `BookingOrchestrator` and runs a readline-based loop that
    //! turns free text and slash commands into intents, printing replies as
    //! their phases fire.

    use super::special_commands::{parse_special_command, print_help, SpecialCommand};
    use super::*;
    use colored::Colorize;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;
    use std::time::Duration;

    /// Upper bound between two redraws while phases are pending
    const REDRAW_INTERVAL: Duration = Duration::from_millis(100);

    /// Start interactive chat mode
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    pub async fn run_chat(config: Config) -> Result<()> {
        tracing::info!("Starting interactive chat mode");
        apply_color_setting(&config);

        let orchestrator = BookingOrchestrator::from_config(&config)?;
        let mut view = ChatView::new(config.chat.show_thinking);
        let mut rl = DefaultEditor::new()?;

        print_welcome_banner(orchestrator.catalog());
        view.print(&orchestrator.snapshot().await);

        loop {
            match rl.readline(&format!("{} ", "you ›".bold().cyan())) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    rl.add_history_entry(trimmed)?;

                    let command = match parse_special_command(trimmed) {
                        Ok(command) => command,
                        Err(e) => {
                            eprintln!("{}", e.to_string().red());
                            continue;
                        }
                    };

                    match command {
                        SpecialCommand::Select { id, kind } => {
                            let kind = kind.or_else(|| orchestrator.catalog().kind_of(&id));
                            match kind {
                                Some(kind) => {
                                    orchestrator.select_option(&id, kind).await?;
                                }
                                None => {
                                    eprintln!(
                                        "{}",
                                        format!(
                                            "No flight or hotel with id '{}'. Use /flight or /hotel to pick anyway.",
                                            id
                                        )
                                        .yellow()
                                    );
                                    continue;
                                }
                            }
                        }
                        SpecialCommand::AlternateFlights => {
                            orchestrator.request_alternate_flights().await?;
                        }
                        SpecialCommand::Day(day) => {
                            orchestrator.set_current_day(day).await;
                            show_itinerary(&orchestrator).await;
                            continue;
                        }
                        SpecialCommand::ShowItinerary => {
                            show_itinerary(&orchestrator).await;
                            continue;
                        }
                        SpecialCommand::ShowStatus => {
                            render::print_status(&orchestrator.snapshot().await);
                            continue;
                        }
                        SpecialCommand::Help => {
                            print_help();
                            continue;
                        }
                        SpecialCommand::Exit => break,
                        SpecialCommand::None => {
                            orchestrator.submit_text(trimmed).await?;
                        }
                    }

                    follow(&orchestrator, &mut view).await?;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        orchestrator.shutdown();
        Ok(())
    }

    /// Print every change until no phase is pending
    async fn follow(orchestrator: &BookingOrchestrator, view: &mut ChatView) -> Result<()> {
        let mut revisions = orchestrator.subscribe();
        loop {
            let _ = revisions.borrow_and_update();
            view.print(&orchestrator.snapshot().await);
            if orchestrator.pending_phases() == 0 {
                break;
            }
            tokio::select! {
                _ = revisions.changed() => {}
                _ = tokio::time::sleep(REDRAW_INTERVAL) => {}
            }
        }
        orchestrator.settle().await?;
        view.print(&orchestrator.snapshot().await);
        Ok(())
    }

    async fn show_itinerary(orchestrator: &BookingOrchestrator) {
        let snapshot = orchestrator.snapshot().await;
        if snapshot.dashboard_visible {
            render::print_dashboard(&snapshot);
        } else {
            println!(
                "{}",
                "Your itinerary appears once a flight and a hotel are booked.".yellow()
            );
        }
    }

    /// Display the welcome banner
    fn print_welcome_banner(catalog: &Catalog) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║            Orbit Travel Concierge - Welcome!                 ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!(
            "Catalog: {} flights, {} hotels, {}-day plan",
            catalog.flights.len(),
            catalog.hotels.len(),
            catalog.total_days()
        );
        println!("Type '/help' for available commands, 'exit' to quit\n");
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use std::path::PathBuf;

        #[tokio::test]
        async fn test_run_chat_missing_catalog_fails_early() {
            let mut config = Config::default();
            config.catalog.path = Some(PathBuf::from("/no/such/catalog.yaml"));
            assert!(run_chat(config).await.is_err());
        }
    }
}

// Run command handler
pub mod r#run {
    //! Session script runner.

    use super::*;
    use crate::script::SessionScript;
    use std::path::Path;

    /// Replay `script_path` and print the settled session
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration
    /// * `script_path` - YAML or JSON script file
    /// * `json` - Print the final snapshot as JSON instead of a transcript
    ///
    /// # Errors
    ///
    /// Returns an error if the script or catalog cannot be loaded, or a
    /// select intent cannot be resolved
    pub async fn run_script(config: Config, script_path: &Path, json: bool) -> Result<()> {
        tracing::info!("Loading session script from: {}", script_path.display());
        apply_color_setting(&config);

        let script = SessionScript::from_file(script_path)?;
        let orchestrator = BookingOrchestrator::from_config(&config)?;
        let (snapshot, report) = script.run(&orchestrator).await?;
        tracing::info!(
            sent = report.sent,
            ignored = report.ignored,
            "Script '{}' finished",
            script.name
        );

        if json {
            render::print_json(&snapshot)?;
        } else {
            render::print_transcript(&snapshot);
        }
        Ok(())
    }
}

// Catalog and itinerary inspection
pub mod inspect {
    //! Read-only views of the reference data.

    use super::*;
    use crate::catalog::{PlanEvent, PlanVariant};
    use colored::Colorize;
    use serde::Serialize;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    struct CatalogListing<'a> {
        flights: &'a [crate::catalog::FlightOption],
        hotels: &'a [crate::catalog::HotelOption],
    }

    /// Print flights and hotels
    pub fn show_catalog(config: &Config, json: bool) -> Result<()> {
        let catalog = Catalog::load(config.catalog.path.as_deref())?;
        apply_color_setting(config);

        if json {
            return render::print_json(&CatalogListing {
                flights: &catalog.flights,
                hotels: &catalog.hotels,
            });
        }

        println!("\n{}\n", "Flights".bold());
        render::flights_table(&catalog.flights).printstd();
        println!("\n{}\n", "Hotels".bold());
        render::hotels_table(&catalog.hotels).printstd();
        println!();
        Ok(())
    }

    /// Events per day for `variant`, restricted to `day` when given
    pub fn plan_days(
        catalog: &Catalog,
        variant: PlanVariant,
        day: Option<u32>,
    ) -> BTreeMap<u32, Vec<PlanEvent>> {
        let days: Vec<u32> = match day {
            Some(day) => vec![day],
            None => (1..=catalog.total_days()).collect(),
        };
        days.into_iter()
            .map(|d| (d, catalog.itinerary.day(variant, d).to_vec()))
            .collect()
    }

    /// Print the itinerary plan
    pub fn show_itinerary(config: &Config, alternate: bool, day: Option<u32>, json: bool) -> Result<()> {
        let catalog = Catalog::load(config.catalog.path.as_deref())?;
        apply_color_setting(config);

        let variant = PlanVariant::for_replanning(alternate);
        let days = plan_days(&catalog, variant, day);
        tracing::debug!(%variant, days = days.len(), "Rendering itinerary");

        if json {
            return render::print_json(&days);
        }

        for (number, events) in &days {
            let changed = if catalog.itinerary.is_overridden(*number) && alternate {
                " (updated)".magenta().to_string()
            } else {
                String::new()
            };
            println!("\n{}{}\n", format!("Day {}", number).bold(), changed);
            if events.is_empty() {
                println!("{}", "No events planned for this day.".yellow());
            } else {
                render::itinerary_table(events).printstd();
            }
        }
        println!();
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_plan_days_all() {
            let catalog = Catalog::builtin();
            let days = plan_days(&catalog, PlanVariant::Baseline, None);
            assert_eq!(days.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
            assert_eq!(days[&1].len(), 5);
        }

        #[test]
        fn test_plan_days_single_alternate() {
            let catalog = Catalog::builtin();
            let days = plan_days(&catalog, PlanVariant::Alternate, Some(1));
            assert_eq!(days.len(), 1);
            assert_eq!(days[&1].len(), 4);
        }

        #[test]
        fn test_plan_days_unknown_day_is_empty() {
            let catalog = Catalog::builtin();
            let days = plan_days(&catalog, PlanVariant::Baseline, Some(9));
            assert!(days[&9].is_empty());
        }
    }
}
