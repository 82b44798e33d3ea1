//! Special commands parser for interactive chat mode
//!
//! This module parses special commands that can be entered during
//! interactive chat sessions. Special commands allow users to:
//! - Pick a flight or hotel from the options on offer
//! - Ask for alternative flights
//! - Browse itinerary days
//! - View session status and help
//! - Exit the session
//!
//! Commands are prefixed with `/` and are case-insensitive. Option ids keep
//! the case they were typed in.

use crate::ledger::OptionKind;
use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command was given an unsupported argument
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Special commands that can be executed during interactive chat
///
/// Anything that is not a special command is submitted as free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Select an option by id
    ///
    /// With no kind (`/select`), the kind is looked up in the catalog.
    Select {
        id: String,
        kind: Option<OptionKind>,
    },

    /// Show the flight options again (`/flights`, `/swap`)
    AlternateFlights,

    /// Switch the dashboard to another day
    Day(u32),

    /// Print the visible itinerary
    ShowItinerary,

    /// Display selections and session flags
    ShowStatus,

    /// Display help information
    Help,

    /// Exit the interactive session
    Exit,

    /// Not a special command
    None,
}

/// Parse user input into a special command
///
/// # Errors
///
/// Returns `CommandError` for unknown commands or bad arguments
///
/// # Examples
///
/// ```
/// use orbit::commands::special_commands::{parse_special_command, SpecialCommand};
/// use orbit::ledger::OptionKind;
///
/// let cmd = parse_special_command("/hotel h2").unwrap();
/// assert_eq!(
///     cmd,
///     SpecialCommand::Select { id: "h2".to_string(), kind: Some(OptionKind::Hotel) }
/// );
///
/// assert_eq!(parse_special_command("Goa").unwrap(), SpecialCommand::None);
/// assert!(parse_special_command("/teleport").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    // If input doesn't start with "/", it's not a command (except exit/quit)
    if !trimmed.starts_with('/') && lower != "exit" && lower != "quit" {
        return Ok(SpecialCommand::None);
    }

    let (command, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command.to_lowercase(), rest.trim()),
        None => (lower.clone(), ""),
    };

    match command.as_str() {
        "/select" => select(&command, rest, None),
        "/flight" => select(&command, rest, Some(OptionKind::Flight)),
        "/hotel" => select(&command, rest, Some(OptionKind::Hotel)),

        "/flights" | "/swap" if rest.is_empty() => Ok(SpecialCommand::AlternateFlights),

        "/day" if rest.is_empty() => Err(CommandError::MissingArgument {
            command: "/day".to_string(),
            usage: "/day <number>".to_string(),
        }),
        "/day" => rest
            .parse::<u32>()
            .map(SpecialCommand::Day)
            .map_err(|_| CommandError::UnsupportedArgument {
                command: "/day".to_string(),
                arg: rest.to_string(),
            }),

        "/itinerary" | "/plan" if rest.is_empty() => Ok(SpecialCommand::ShowItinerary),
        "/status" if rest.is_empty() => Ok(SpecialCommand::ShowStatus),
        "/help" | "/?" => Ok(SpecialCommand::Help),

        "exit" | "quit" | "/exit" | "/quit" => Ok(SpecialCommand::Exit),

        "/flights" | "/swap" | "/itinerary" | "/plan" | "/status" => {
            Err(CommandError::UnsupportedArgument {
                command: command.clone(),
                arg: rest.to_string(),
            })
        }

        // Unknown command starting with "/"
        _ => Err(CommandError::UnknownCommand(command.clone())),
    }
}

fn select(
    command: &str,
    rest: &str,
    kind: Option<OptionKind>,
) -> Result<SpecialCommand, CommandError> {
    let mut args = rest.split_whitespace();
    match (args.next(), args.next()) {
        (None, _) => Err(CommandError::MissingArgument {
            command: command.to_string(),
            usage: format!("{} <option-id>", command),
        }),
        (Some(id), None) => Ok(SpecialCommand::Select {
            id: id.to_string(),
            kind,
        }),
        (Some(_), Some(extra)) => Err(CommandError::UnsupportedArgument {
            command: command.to_string(),
            arg: extra.to_string(),
        }),
    }
}

/// Display help text for special commands
pub fn print_help() {
    println!(
        r#"
Special Commands for Orbit Chat
===============================

BOOKING:
  /select <id>    - Choose a flight or hotel by id (e.g. /select opt1)
  /flight <id>    - Choose a flight
  /hotel <id>     - Choose a hotel
  /flights        - See other flight options
  /swap           - Same as /flights

ITINERARY:
  /day <n>        - Show day n of the itinerary
  /itinerary      - Show the current day again
  /plan           - Same as /itinerary

SESSION INFORMATION:
  /status         - Show selections and planning status
  /help           - Show this help message
  /?              - Same as /help

SESSION CONTROL:
  exit            - Exit interactive mode
  quit            - Same as exit

NOTES:
  - Commands are case-insensitive
  - Regular text (not starting with /) answers Orbit's questions
"#
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_text_is_not_a_command() {
        assert_eq!(parse_special_command("Goa").unwrap(), SpecialCommand::None);
        assert_eq!(
            parse_special_command("2 people").unwrap(),
            SpecialCommand::None
        );
    }

    #[test]
    fn test_select_variants() {
        assert_eq!(
            parse_special_command("/select opt2").unwrap(),
            SpecialCommand::Select {
                id: "opt2".to_string(),
                kind: None
            }
        );
        assert_eq!(
            parse_special_command("/FLIGHT opt3").unwrap(),
            SpecialCommand::Select {
                id: "opt3".to_string(),
                kind: Some(OptionKind::Flight)
            }
        );
    }

    #[test]
    fn test_select_keeps_id_case() {
        assert_eq!(
            parse_special_command("/hotel Villa-7").unwrap(),
            SpecialCommand::Select {
                id: "Villa-7".to_string(),
                kind: Some(OptionKind::Hotel)
            }
        );
    }

    #[test]
    fn test_select_argument_errors() {
        assert!(matches!(
            parse_special_command("/select"),
            Err(CommandError::MissingArgument { .. })
        ));
        assert!(matches!(
            parse_special_command("/hotel h1 h2"),
            Err(CommandError::UnsupportedArgument { .. })
        ));
    }

    #[test]
    fn test_day_command() {
        assert_eq!(parse_special_command("/day 3").unwrap(), SpecialCommand::Day(3));
        assert!(matches!(
            parse_special_command("/day"),
            Err(CommandError::MissingArgument { .. })
        ));
        assert!(matches!(
            parse_special_command("/day two"),
            Err(CommandError::UnsupportedArgument { .. })
        ));
    }

    #[test]
    fn test_info_commands() {
        assert_eq!(
            parse_special_command("/flights").unwrap(),
            SpecialCommand::AlternateFlights
        );
        assert_eq!(
            parse_special_command("/swap").unwrap(),
            SpecialCommand::AlternateFlights
        );
        assert_eq!(
            parse_special_command("/Itinerary").unwrap(),
            SpecialCommand::ShowItinerary
        );
        assert_eq!(
            parse_special_command("/status").unwrap(),
            SpecialCommand::ShowStatus
        );
        assert_eq!(parse_special_command("/?").unwrap(), SpecialCommand::Help);
        assert!(matches!(
            parse_special_command("/status now"),
            Err(CommandError::UnsupportedArgument { .. })
        ));
    }

    #[test]
    fn test_exit_commands() {
        for input in ["exit", "QUIT", "/exit", "/quit"] {
            assert_eq!(parse_special_command(input).unwrap(), SpecialCommand::Exit);
        }
    }

    #[test]
    fn test_unknown_command() {
        let err = parse_special_command("/teleport goa").unwrap_err();
        assert_eq!(err, CommandError::UnknownCommand("/teleport".to_string()));
        assert!(err.to_string().contains("/help"));
    }
}
