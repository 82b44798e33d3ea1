//! Error types for Orbit
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Orbit operations
///
/// Covers configuration loading, catalog validation, session scripts and
/// the terminal front-end. The orchestrator itself has no fatal paths; the
/// only error it can surface is a ledger id generation failure.
#[derive(Error, Debug)]
pub enum OrbitError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reference data failed to load or validate
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Session script parsing or validation errors
    #[error("Script error: {0}")]
    Script(String),

    /// Ledger could not mint a new message id
    #[error("Ledger error: {0}")]
    Ledger(String),

    /// A deferred orchestrator phase panicked or was cancelled
    #[error("Phase task failed: {0}")]
    Phase(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for Orbit operations
///
/// Uses `anyhow::Error` so call sites can attach context while still
/// downcasting to [`OrbitError`] where a specific variant matters.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = OrbitError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_catalog_error_display() {
        let error = OrbitError::Catalog("duplicate flight id: opt1".to_string());
        assert_eq!(error.to_string(), "Catalog error: duplicate flight id: opt1");
    }

    #[test]
    fn test_script_error_display() {
        let error = OrbitError::Script("no intents".to_string());
        assert_eq!(error.to_string(), "Script error: no intents");
    }

    #[test]
    fn test_phase_error_display() {
        let error = OrbitError::Phase("task panicked".to_string());
        assert_eq!(error.to_string(), "Phase task failed: task panicked");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: OrbitError = io_error.into();
        assert!(matches!(error, OrbitError::Io(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("invalid: : yaml").unwrap_err();
        let error: OrbitError = yaml_error.into();
        assert!(matches!(error, OrbitError::Yaml(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{invalid json}").unwrap_err();
        let error: OrbitError = json_error.into();
        assert!(matches!(error, OrbitError::Serialization(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<OrbitError>();
    }
}
