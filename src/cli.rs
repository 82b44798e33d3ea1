//! Command-line interface definition for Orbit
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for interactive chat, scripted sessions and
//! catalog inspection.

use crate::config::ReentryPolicy;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Orbit - conversational travel booking in the terminal
///
/// Answer a short scripted interview, pick a flight and a hotel, and
/// browse the generated day-by-day itinerary.
#[derive(Parser, Debug, Clone)]
#[command(name = "orbit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Catalog file (YAML or JSON) replacing the built-in dataset
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Multiply every simulated latency (0 fires phases immediately)
    #[arg(long, global = true, value_parser = parse_latency_scale)]
    pub latency_scale: Option<f64>,

    /// Handling of pending phases when a new intent arrives (permissive, guarded)
    #[arg(long, global = true, value_parser = ReentryPolicy::parse_str)]
    pub reentry_policy: Option<ReentryPolicy>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Orbit
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive booking conversation
    Chat,

    /// Replay a session script and print the resulting session
    Run {
        /// Path to the script file (YAML or JSON)
        script: PathBuf,

        /// Print the final snapshot as JSON instead of a transcript
        #[arg(long)]
        json: bool,
    },

    /// List the flights and hotels on offer
    Catalog {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Show the itinerary plan
    Itinerary {
        /// Show the plan used after a flight change
        #[arg(short, long)]
        alternate: bool,

        /// Only show this day
        #[arg(short, long)]
        day: Option<u32>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

fn parse_latency_scale(s: &str) -> std::result::Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("Invalid latency scale: {}", s))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!(
            "Latency scale must be a non-negative number, got {}",
            s
        ));
    }
    Ok(value)
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            catalog: None,
            latency_scale: None,
            reentry_policy: None,
            no_color: false,
            command: Commands::Chat,
        }
    }
}
