use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use orbit::config::{LatencyConfig, OrchestratorConfig, ReentryPolicy};
use orbit::BookingOrchestrator;

pub const ANSWERS: [&str; 5] = ["Goa", "Delhi", "June", "2 people", "Relaxed"];

#[allow(dead_code)]
pub fn orchestrator(policy: ReentryPolicy) -> BookingOrchestrator {
    BookingOrchestrator::with_builtin_catalog(OrchestratorConfig {
        latency: LatencyConfig::default(),
        reentry_policy: policy,
    })
    .expect("failed to create orchestrator")
}

#[allow(dead_code)]
pub fn instant_orchestrator() -> BookingOrchestrator {
    BookingOrchestrator::with_builtin_catalog(OrchestratorConfig {
        latency: LatencyConfig::instant(),
        reentry_policy: ReentryPolicy::Permissive,
    })
    .expect("failed to create orchestrator")
}

/// Answer every interview question, waiting for each reply
#[allow(dead_code)]
pub async fn answer_interview(orchestrator: &BookingOrchestrator) {
    for answer in ANSWERS {
        orchestrator.submit_text(answer).await.expect("submit failed");
        orchestrator.settle().await.expect("settle failed");
    }
}

#[allow(dead_code)]
pub fn temp_file(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let path = temp_dir.path().join(name);
    fs::write(&path, contents).expect("failed to write file");
    (temp_dir, path)
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    temp_file("config.yaml", contents)
}
