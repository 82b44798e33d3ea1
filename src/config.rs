//! Configuration management for Orbit
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{OrbitError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Upper bound for any single simulated latency
const MAX_LATENCY_MS: u64 = 60_000;

/// Main configuration structure for Orbit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Booking orchestrator behavior
    #[serde(default)]
    pub orchestrator: OrchestratorConfig,
    /// Reference data source
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Terminal chat front-end
    #[serde(default)]
    pub chat: ChatConfig,
}

/// Booking orchestrator configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Simulated "thinking" durations per phase
    #[serde(default)]
    pub latency: LatencyConfig,

    /// What happens to pending phases when a new intent arrives
    #[serde(default)]
    pub reentry_policy: ReentryPolicy,
}

/// Simulated latency for each orchestrator phase, in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencyConfig {
    /// Reply to a free-text message
    #[serde(default = "default_standard_ms")]
    pub standard_ms: u64,

    /// Second phase of the vibe → flights transition
    #[serde(default = "default_flight_scan_ms")]
    pub flight_scan_ms: u64,

    /// First flight choice → hotel options
    #[serde(default = "default_flight_confirm_ms")]
    pub flight_confirm_ms: u64,

    /// Flight change → replanning notice
    #[serde(default = "default_replan_ms")]
    pub replan_ms: u64,

    /// Hotel choice → confirmation
    #[serde(default = "default_hotel_confirm_ms")]
    pub hotel_confirm_ms: u64,

    /// Confirmation → itinerary generation starts
    #[serde(default = "default_generation_pause_ms")]
    pub generation_pause_ms: u64,

    /// Itinerary generation → dashboard visible
    #[serde(default = "default_generation_ms")]
    pub generation_ms: u64,

    /// Alternate flight request → flight options
    #[serde(default = "default_alternate_flights_ms")]
    pub alternate_flights_ms: u64,
}

fn default_standard_ms() -> u64 {
    1000
}

fn default_flight_scan_ms() -> u64 {
    2000
}

fn default_flight_confirm_ms() -> u64 {
    2000
}

fn default_replan_ms() -> u64 {
    2000
}

fn default_hotel_confirm_ms() -> u64 {
    1500
}

fn default_generation_pause_ms() -> u64 {
    800
}

fn default_generation_ms() -> u64 {
    3500
}

fn default_alternate_flights_ms() -> u64 {
    1500
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            standard_ms: default_standard_ms(),
            flight_scan_ms: default_flight_scan_ms(),
            flight_confirm_ms: default_flight_confirm_ms(),
            replan_ms: default_replan_ms(),
            hotel_confirm_ms: default_hotel_confirm_ms(),
            generation_pause_ms: default_generation_pause_ms(),
            generation_ms: default_generation_ms(),
            alternate_flights_ms: default_alternate_flights_ms(),
        }
    }
}

impl LatencyConfig {
    /// All phases complete immediately (still deferred, never inline)
    pub fn instant() -> Self {
        Self::default().scaled(0.0)
    }

    /// Multiply every latency by `factor`
    ///
    /// # Examples
    ///
    /// ```
    /// use orbit::config::LatencyConfig;
    ///
    /// let half = LatencyConfig::default().scaled(0.5);
    /// assert_eq!(half.standard_ms, 500);
    /// assert_eq!(half.generation_ms, 1750);
    /// ```
    pub fn scaled(&self, factor: f64) -> Self {
        let scale = |ms: u64| (ms as f64 * factor).round().max(0.0) as u64;
        Self {
            standard_ms: scale(self.standard_ms),
            flight_scan_ms: scale(self.flight_scan_ms),
            flight_confirm_ms: scale(self.flight_confirm_ms),
            replan_ms: scale(self.replan_ms),
            hotel_confirm_ms: scale(self.hotel_confirm_ms),
            generation_pause_ms: scale(self.generation_pause_ms),
            generation_ms: scale(self.generation_ms),
            alternate_flights_ms: scale(self.alternate_flights_ms),
        }
    }

    pub fn standard(&self) -> Duration {
        Duration::from_millis(self.standard_ms)
    }

    pub fn flight_scan(&self) -> Duration {
        Duration::from_millis(self.flight_scan_ms)
    }

    pub fn flight_confirm(&self) -> Duration {
        Duration::from_millis(self.flight_confirm_ms)
    }

    pub fn replan(&self) -> Duration {
        Duration::from_millis(self.replan_ms)
    }

    pub fn hotel_confirm(&self) -> Duration {
        Duration::from_millis(self.hotel_confirm_ms)
    }

    pub fn generation_pause(&self) -> Duration {
        Duration::from_millis(self.generation_pause_ms)
    }

    pub fn generation(&self) -> Duration {
        Duration::from_millis(self.generation_ms)
    }

    pub fn alternate_flights(&self) -> Duration {
        Duration::from_millis(self.alternate_flights_ms)
    }

    fn entries(&self) -> [(&'static str, u64); 8] {
        [
            ("standard_ms", self.standard_ms),
            ("flight_scan_ms", self.flight_scan_ms),
            ("flight_confirm_ms", self.flight_confirm_ms),
            ("replan_ms", self.replan_ms),
            ("hotel_confirm_ms", self.hotel_confirm_ms),
            ("generation_pause_ms", self.generation_pause_ms),
            ("generation_ms", self.generation_ms),
            ("alternate_flights_ms", self.alternate_flights_ms),
        ]
    }
}

/// Handling of deferred phases that are still pending when a new intent arrives
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReentryPolicy {
    /// Every scheduled phase fires, even if newer intents arrived meanwhile
    #[default]
    Permissive,
    /// Phases scheduled before the latest intent are dropped when they fire
    Guarded,
}

impl ReentryPolicy {
    /// Parse a reentry policy from a string
    ///
    /// # Examples
    ///
    /// ```
    /// use orbit::config::ReentryPolicy;
    ///
    /// assert_eq!(ReentryPolicy::parse_str("guarded").unwrap(), ReentryPolicy::Guarded);
    /// assert!(ReentryPolicy::parse_str("strict").is_err());
    /// ```
    pub fn parse_str(s: &str) -> std::result::Result<Self, String> {
        match s.to_lowercase().as_str() {
            "permissive" => Ok(Self::Permissive),
            "guarded" => Ok(Self::Guarded),
            other => Err(format!("Unknown reentry policy: {}", other)),
        }
    }
}

impl fmt::Display for ReentryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Permissive => write!(f, "permissive"),
            Self::Guarded => write!(f, "guarded"),
        }
    }
}

/// Reference data configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog file (YAML or JSON); the built-in dataset is used when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Terminal chat configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Print the thinking indicator while a phase is pending
    #[serde(default = "default_show_thinking")]
    pub show_thinking: bool,

    /// Colorize output
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_show_thinking() -> bool {
    true
}

fn default_color() -> bool {
    true
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            show_thinking: default_show_thinking(),
            color: default_color(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| OrbitError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| OrbitError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(policy) = std::env::var("ORBIT_REENTRY_POLICY") {
            match ReentryPolicy::parse_str(&policy) {
                Ok(value) => {
                    self.orchestrator.reentry_policy = value;
                    tracing::debug!(policy = %value, "Env override: ORBIT_REENTRY_POLICY");
                }
                Err(_) => tracing::warn!("Invalid ORBIT_REENTRY_POLICY: {}", policy),
            }
        }

        if let Ok(scale) = std::env::var("ORBIT_LATENCY_SCALE") {
            match scale.parse::<f64>() {
                Ok(value) if value >= 0.0 && value.is_finite() => {
                    self.orchestrator.latency = self.orchestrator.latency.scaled(value);
                    tracing::debug!(scale = value, "Env override: ORBIT_LATENCY_SCALE");
                }
                _ => tracing::warn!("Invalid ORBIT_LATENCY_SCALE: {}", scale),
            }
        }

        if let Ok(catalog_path) = std::env::var("ORBIT_CATALOG_PATH") {
            tracing::debug!(catalog_path = %catalog_path, "Env override: ORBIT_CATALOG_PATH");
            self.catalog.path = Some(PathBuf::from(catalog_path));
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }
        if let Some(path) = &cli.catalog {
            self.catalog.path = Some(path.clone());
        }
        if let Some(scale) = cli.latency_scale {
            self.orchestrator.latency = self.orchestrator.latency.scaled(scale);
        }
        if let Some(policy) = cli.reentry_policy {
            self.orchestrator.reentry_policy = policy;
        }
        if cli.no_color {
            self.chat.color = false;
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `OrbitError::Config` if a latency exceeds one minute or the
    /// configured catalog file does not exist
    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.orchestrator.latency.entries() {
            if value > MAX_LATENCY_MS {
                return Err(OrbitError::Config(format!(
                    "orchestrator.latency.{} must be at most {} ms, got {}",
                    name, MAX_LATENCY_MS, value
                ))
                .into());
            }
        }

        if let Some(path) = &self.catalog.path {
            if !path.exists() {
                return Err(OrbitError::Config(format!(
                    "catalog.path does not exist: {}",
                    path.display()
                ))
                .into());
            }
        }

        Ok(())
    }
}
