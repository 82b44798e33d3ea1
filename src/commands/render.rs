//! Terminal rendering for chat transcripts, option lists and itineraries

use crate::catalog::{BadgeColor, FlightOption, HotelOption, PlanEvent};
use crate::error::{OrbitError, Result};
use crate::ledger::{ChatMessage, OptionSet, Sender};
use crate::orchestrator::SessionSnapshot;
use colored::{ColoredString, Colorize};
use prettytable::{format, row, Table};
use serde::Serialize;

pub fn flights_table(flights: &[FlightOption]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(row![
        "ID".bold(),
        "Airline".bold(),
        "Route".bold(),
        "Time".bold(),
        "Price".bold(),
        "Notes".bold()
    ]);

    for flight in flights {
        let notes = match &flight.scarcity_msg {
            Some(msg) => format!("{} ({})", flight.tag, msg),
            None => flight.tag.clone(),
        };
        table.add_row(row![
            flight.id.cyan(),
            flight.airline,
            flight.path,
            flight.time,
            flight.price,
            notes
        ]);
    }
    table
}

pub fn hotels_table(hotels: &[HotelOption]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(row![
        "ID".bold(),
        "Hotel".bold(),
        "Location".bold(),
        "Rating".bold(),
        "Price".bold(),
        "Notes".bold()
    ]);

    for hotel in hotels {
        let notes = match &hotel.scarcity_msg {
            Some(msg) => format!("{} ({})", hotel.tag, msg),
            None => hotel.tag.clone(),
        };
        table.add_row(row![
            hotel.id.cyan(),
            hotel.name,
            hotel.location,
            hotel.rating,
            hotel.price,
            notes
        ]);
    }
    table
}

/// One row per event; flight rows are marked as swappable
pub fn itinerary_table(events: &[PlanEvent]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(row![
        "Time".bold(),
        "Type".bold(),
        "Event".bold(),
        "Details".bold(),
        "Badges".bold()
    ]);

    for event in events {
        let mut details = event.subtitle.clone();
        if let Some(duration) = &event.duration {
            details.push_str(&format!(" · {}", duration));
        }
        if let Some(price) = &event.price {
            details.push_str(&format!(" · {}", price));
        }
        let title = if event.is_swappable() {
            format!("{} [/swap]", event.title)
        } else {
            event.title.clone()
        };
        let badges = event
            .badges
            .iter()
            .flatten()
            .map(|b| badge(&b.text, b.color).to_string())
            .collect::<Vec<_>>()
            .join(" ");

        table.add_row(row![event.time, event.event_type, title, details, badges]);
    }
    table
}

fn badge(text: &str, color: BadgeColor) -> ColoredString {
    match color {
        BadgeColor::Green => text.green(),
        BadgeColor::Blue => text.blue(),
        BadgeColor::Orange => text.yellow(),
        BadgeColor::Red => text.red(),
        BadgeColor::Purple => text.purple(),
        BadgeColor::Yellow => text.bright_yellow(),
        BadgeColor::White => text.white(),
    }
}

/// Print a ledger entry, followed by its option table if it carries one
pub fn print_message(message: &ChatMessage) {
    match message.sender {
        Sender::User => println!("{} {}", "you ›".bold().cyan(), message.text),
        Sender::Assistant => println!("{} {}", "orbit ›".bold().green(), message.text),
    }

    match &message.options {
        Some(OptionSet::Flights(flights)) => {
            flights_table(flights).printstd();
            println!("{}", "Pick one with /select <id>".dimmed());
        }
        Some(OptionSet::Hotels(hotels)) => {
            hotels_table(hotels).printstd();
            println!("{}", "Pick one with /select <id>".dimmed());
        }
        None => {}
    }
}

pub fn print_thinking(label: &str) {
    println!("{}", format!("… {}", label).italic().yellow());
}

pub fn print_generating() {
    println!("{}", "Building your itinerary...".italic().yellow());
}

/// Dashboard header plus the events of the current day
pub fn print_dashboard(snapshot: &SessionSnapshot) {
    let days = snapshot
        .day_selector()
        .map(|day| {
            if day == snapshot.current_day {
                format!("[Day {}]", day).bold().to_string()
            } else {
                format!("Day {}", day)
            }
        })
        .collect::<Vec<_>>()
        .join("  ");

    println!();
    println!("{}", snapshot.trip_summary().bold());
    println!("{}  {}", snapshot.plan_status().magenta(), days);
    if snapshot.visible_events.is_empty() {
        println!("{}", "No events planned for this day.".yellow());
    } else {
        itinerary_table(&snapshot.visible_events).printstd();
    }
    println!();
}

pub fn print_status(snapshot: &SessionSnapshot) {
    let flight = snapshot
        .selected_flight
        .as_ref()
        .map_or_else(|| "none".to_string(), |f| format!("{} ({})", f.airline, f.id));
    let hotel = snapshot
        .selected_hotel
        .as_ref()
        .map_or_else(|| "none".to_string(), |h| format!("{} ({})", h.name, h.id));

    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                      Orbit Session Status                    ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    println!("Conversation:      {} ({} answers)", snapshot.phase, snapshot.step);
    println!("Flight:            {}", flight);
    println!("Hotel:             {}", hotel);
    println!("Plan:              {} ({})", snapshot.plan_status(), snapshot.plan_variant);
    println!(
        "Dashboard:         {}",
        if snapshot.dashboard_visible {
            format!("visible, day {} of {}", snapshot.current_day, snapshot.total_days)
        } else if snapshot.generating_plan {
            "generating".to_string()
        } else {
            "hidden".to_string()
        }
    );
    println!("Messages:          {}", snapshot.messages.len());
    println!();
}

/// Whole conversation followed by the dashboard, if visible
pub fn print_transcript(snapshot: &SessionSnapshot) {
    for message in &snapshot.messages {
        print_message(message);
    }
    if snapshot.dashboard_visible {
        print_dashboard(snapshot);
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(OrbitError::Serialization)?;
    println!("{}", json);
    Ok(())
}
