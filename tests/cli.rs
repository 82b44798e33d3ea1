//! Binary-level tests for the `orbit` command

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

use common::temp_file;

const SCRIPT: &str = r#"
name: Goa booking
intents:
  - intent: say
    text: Goa
  - intent: say
    text: Delhi
  - intent: say
    text: June
  - intent: say
    text: 2 people
  - intent: say
    text: Relaxed
  - intent: select
    id: opt1
  - intent: select
    id: h1
"#;

fn orbit() -> Command {
    let mut cmd = Command::cargo_bin("orbit").expect("binary should build");
    cmd.env_remove("ORBIT_REENTRY_POLICY")
        .env_remove("ORBIT_LATENCY_SCALE")
        .env_remove("ORBIT_CATALOG_PATH")
        .env_remove("RUST_LOG")
        .args(["--config", "/nonexistent/orbit-config.yaml", "--no-color"]);
    cmd
}

#[test]
fn test_catalog_json_lists_options() {
    let output = orbit().args(["catalog", "--json"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["flights"].as_array().unwrap().len(), 3);
    assert_eq!(json["hotels"][0]["name"], "The St. Regis Goa");
}

#[test]
fn test_catalog_table_output() {
    orbit()
        .arg("catalog")
        .assert()
        .success()
        .stdout(predicate::str::contains("Vistara UK-88"))
        .stdout(predicate::str::contains("Alila Diwa"));
}

#[test]
fn test_itinerary_alternate_day_one() {
    let output = orbit()
        .args(["itinerary", "--alternate", "--day", "1", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let day_one = json["1"].as_array().unwrap();
    assert_eq!(day_one.len(), 4);
    assert_eq!(day_one[0]["id"], "1-1-alt");
    assert!(json.get("2").is_none());
}

#[test]
fn test_itinerary_all_days() {
    orbit()
        .arg("itinerary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Day 4"));
}

#[test]
fn test_run_script_json() {
    let (_dir, script) = temp_file("goa.yaml", SCRIPT);
    let output = orbit()
        .args(["--latency-scale", "0", "run"])
        .arg(&script)
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let snapshot: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(snapshot["step"], 5);
    assert_eq!(snapshot["dashboard_visible"], true);
    assert_eq!(snapshot["selected_hotel"]["id"], "h1");
    assert_eq!(snapshot["visible_events"].as_array().unwrap().len(), 5);
}

#[test]
fn test_run_script_transcript() {
    let (_dir, script) = temp_file("goa.yaml", SCRIPT);
    orbit()
        .args(["run", "--latency-scale", "0"])
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello! I'm Orbit."))
        .stdout(predicate::str::contains(
            "4 Days • Indigo 6E-23 + The St. Regis Goa",
        ));
}

#[test]
fn test_run_missing_script_fails() {
    orbit()
        .args(["run", "/nonexistent/script.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read script file"));
}

#[test]
fn test_run_rejects_invalid_script() {
    let (_dir, script) = temp_file("empty.json", r#"{"name": "empty", "intents": []}"#);
    orbit()
        .arg("run")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("has no intents"));
}

#[test]
fn test_negative_latency_scale_rejected() {
    orbit()
        .args(["--latency-scale", "-2", "catalog"])
        .assert()
        .failure();
}

#[test]
fn test_missing_catalog_path_rejected() {
    orbit()
        .args(["--catalog", "/nonexistent/catalog.yaml", "catalog"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("catalog.path does not exist"));
}
