//! Test utilities for Orbit
//!
//! This module provides temporary file helpers, assertion helpers and
//! orchestrator builders with deterministic latencies.

use crate::config::{Config, LatencyConfig, OrchestratorConfig, ReentryPolicy};
use crate::error::OrbitError;
use crate::orchestrator::BookingOrchestrator;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary directory for testing
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Create a test file with the given content
///
/// # Panics
///
/// Panics if file creation or writing fails
pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}

/// Assert that an error contains the expected message
///
/// # Panics
///
/// Panics if the result is Ok or if the error doesn't contain the expected message
pub fn assert_error_contains<T>(result: Result<T, OrbitError>, expected: &str) {
    match result {
        Ok(_) => panic!("Expected error containing '{}' but got Ok", expected),
        Err(e) => {
            let error_msg = e.to_string();
            assert!(
                error_msg.contains(expected),
                "Error message '{}' does not contain '{}'",
                error_msg,
                expected
            );
        }
    }
}

/// Configuration whose phases all fire immediately
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.orchestrator.latency = LatencyConfig::instant();
    config
}

/// Create a test configuration YAML string
pub fn test_config_yaml() -> String {
    r#"
orchestrator:
  reentry_policy: guarded
  latency:
    standard_ms: 10
    flight_scan_ms: 20
    flight_confirm_ms: 20
    replan_ms: 20
    hotel_confirm_ms: 15
    generation_pause_ms: 8
    generation_ms: 35
    alternate_flights_ms: 15

chat:
  show_thinking: false
  color: false
"#
    .to_string()
}

/// Orchestrator over the built-in catalog with zero latencies
pub fn instant_orchestrator() -> BookingOrchestrator {
    orchestrator_with(LatencyConfig::instant(), ReentryPolicy::Permissive)
}

/// Orchestrator over the built-in catalog with the default latencies
///
/// Meant for `start_paused` tests that step through phase timing.
pub fn orchestrator_with_default_latency() -> BookingOrchestrator {
    orchestrator_with(LatencyConfig::default(), ReentryPolicy::Permissive)
}

pub fn orchestrator_with(latency: LatencyConfig, reentry_policy: ReentryPolicy) -> BookingOrchestrator {
    BookingOrchestrator::with_builtin_catalog(OrchestratorConfig {
        latency,
        reentry_policy,
    })
    .expect("Failed to create orchestrator")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dir_creation() {
        let dir = temp_dir();
        assert!(dir.path().exists());
    }

    #[test]
    fn test_create_test_file() {
        let dir = temp_dir();
        let path = create_test_file(&dir, "test.txt", "content");
        assert!(path.exists());
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "content");
    }

    #[test]
    fn test_assert_error_contains_success() {
        let result: Result<(), OrbitError> =
            Err(OrbitError::Config("test error message".to_string()));
        assert_error_contains(result, "test error");
    }

    #[test]
    #[should_panic(expected = "Expected error containing")]
    fn test_assert_error_contains_ok() {
        let result: Result<(), OrbitError> = Ok(());
        assert_error_contains(result, "error");
    }

    #[test]
    #[should_panic(expected = "does not contain")]
    fn test_assert_error_contains_wrong_message() {
        let result: Result<(), OrbitError> =
            Err(OrbitError::Config("different error".to_string()));
        assert_error_contains(result, "not present");
    }

    #[test]
    fn test_test_config() {
        let config = test_config();
        assert_eq!(config.orchestrator.latency.generation_ms, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_test_config_yaml() {
        let yaml = test_config_yaml();
        let config: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config.orchestrator.reentry_policy, ReentryPolicy::Guarded);
        assert_eq!(config.orchestrator.latency.generation_ms, 35);
        assert!(!config.chat.show_thinking);
        assert!(config.validate().is_ok());
    }

    #[tokio::test]
    async fn test_instant_orchestrator_starts_with_greeting() {
        let orchestrator = instant_orchestrator();
        assert_eq!(orchestrator.snapshot().await.messages.len(), 1);
    }
}
