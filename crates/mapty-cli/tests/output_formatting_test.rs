//! Integration tests for output formatting
//!
//! These tests run the built binary against an isolated data file and check
//! that JSON output is valid and carries the expected fields.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn mapty(data_file: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mapty"))
        .args(args)
        .arg("--data-file")
        .arg(data_file)
        .env_remove("MAPTY_HOME")
        .env_remove("MAPTY_STORAGE_KEY")
        .env_remove("MAPTY_MAP_ZOOM")
        .env_remove("MAPTY_DATA_FILE")
        .env("RUST_LOG", "error")
        .output()
        .expect("Failed to execute command")
}

fn json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("Output should be valid JSON")
}

fn add_run(data_file: &Path) -> String {
    let output = mapty(
        data_file,
        &[
            "add", "--json", "--kind", "running", "--at", "40.7,-74.0", "--distance", "5",
            "--duration", "25", "--cadence", "180",
        ],
    );
    assert!(output.status.success(), "add should succeed");
    json(&output)["data"]["workout"]["id"].as_str().unwrap().to_string()
}

#[test]
fn test_add_json_output() {
    let dir = TempDir::new().unwrap();
    let data_file = dir.path().join("mapty.json");

    let output = mapty(
        &data_file,
        &[
            "add", "--json", "--kind", "running", "--at", "40.7,-74.0", "--distance", "5",
            "--duration", "25", "--cadence", "180",
        ],
    );
    assert!(output.status.success(), "Command should succeed");

    let parsed = json(&output);
    assert_eq!(parsed["status"], "success");

    let workout = &parsed["data"]["workout"];
    assert_eq!(workout["type"], "running");
    assert_eq!(workout["pace"].as_f64(), Some(5.0));
    assert_eq!(workout["coords"][0].as_f64(), Some(40.7));
    assert!(workout["description"].as_str().unwrap().starts_with("Running on "));
    assert_eq!(parsed["data"]["marker"]["style_class"], "running-popup");

    assert!(data_file.exists(), "add should persist the workout");
}

#[test]
fn test_invalid_input_fails_without_writing() {
    let dir = TempDir::new().unwrap();
    let data_file = dir.path().join("mapty.json");

    let output = mapty(
        &data_file,
        &[
            "add", "--kind", "cycling", "--at", "48.1,11.5", "--distance", "-1", "--duration",
            "60", "--elevation", "100",
        ],
    );
    assert!(!output.status.success(), "Negative distance should be rejected");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid distance"), "stderr: {}", stderr);
    assert!(!data_file.exists(), "Nothing should be persisted");
}

#[test]
fn test_list_in_insertion_order() {
    let dir = TempDir::new().unwrap();
    let data_file = dir.path().join("mapty.json");

    let first = add_run(&data_file);
    let second = add_run(&data_file);

    let output = mapty(&data_file, &["list", "--json"]);
    assert!(output.status.success());

    let items = json(&output)["data"].as_array().unwrap().clone();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], first.as_str());
    assert_eq!(items[1]["id"], second.as_str());
    assert_eq!(items[0]["metric"]["value"], "5.0");
    assert_eq!(items[0]["metric"]["unit"], "min/km");
}

#[test]
fn test_edit_recomputes_pace() {
    let dir = TempDir::new().unwrap();
    let data_file = dir.path().join("mapty.json");
    let id = add_run(&data_file);

    let output = mapty(&data_file, &["edit", &id, "--distance", "10", "--duration", "50", "--json"]);
    assert!(output.status.success());

    let workout = &json(&output)["data"]["workout"];
    assert_eq!(workout["distance"].as_f64(), Some(10.0));
    assert_eq!(workout["pace"].as_f64(), Some(5.0));
    assert_eq!(workout["id"], id.as_str());
}

#[test]
fn test_show_unknown_id_fails() {
    let dir = TempDir::new().unwrap();
    let data_file = dir.path().join("mapty.json");

    let output = mapty(&data_file, &["show", "no-such-workout"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Workout not found"), "stderr: {}", stderr);
}

#[test]
fn test_export_matches_persisted_schema() {
    let dir = TempDir::new().unwrap();
    let data_file = dir.path().join("mapty.json");
    add_run(&data_file);

    let output = mapty(&data_file, &["export", "--json"]);
    assert!(output.status.success());

    let records = json(&output)["data"].as_array().unwrap().clone();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["type"], "running");
    assert!(records[0].get("createdAt").is_some());
    assert_eq!(records[0]["cadence"].as_f64(), Some(180.0));
}

#[test]
fn test_reset_requires_confirmation() {
    let dir = TempDir::new().unwrap();
    let data_file = dir.path().join("mapty.json");
    add_run(&data_file);

    let refused = mapty(&data_file, &["reset"]);
    assert!(!refused.status.success());

    let output = mapty(&data_file, &["reset", "--yes", "--json"]);
    assert!(output.status.success());
    assert_eq!(json(&output)["data"]["removed"].as_u64(), Some(1));

    let listed = mapty(&data_file, &["list", "--json"]);
    assert_eq!(json(&listed)["data"].as_array().map(Vec::len), Some(0));
}

#[test]
fn test_config_reports_sources() {
    let dir = TempDir::new().unwrap();
    let data_file = dir.path().join("mapty.json");

    let output = mapty(&data_file, &["config", "--json", "--zoom", "15"]);
    assert!(output.status.success());

    let entries = json(&output)["data"].as_array().unwrap().clone();
    let zoom = entries.iter().find(|e| e["key"] == "map_zoom").unwrap();
    assert_eq!(zoom["value"], "15");
    assert_eq!(zoom["source"], "Cli");

    let data = entries.iter().find(|e| e["key"] == "data_file").unwrap();
    assert_eq!(data["source"], "Cli");
}
