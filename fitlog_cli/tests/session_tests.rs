//! Session tests for the fitlog binary.
//!
//! A session feeds JSON request lines through one in-memory store and prints
//! one JSON response per line.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("fitlog"))
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Write a config file so tests never read the user's real config
fn write_config(dir: &Path, ledger: &str) -> std::path::PathBuf {
    let path = dir.join("config.toml");
    let contents = format!(
        "[data]\nexport_dir = {:?}\n\n[ledger]\n{}\n",
        dir.join("exports"),
        ledger
    );
    fs::write(&path, contents).expect("Failed to write config");
    path
}

fn run_session(config: &Path, input: &str) -> Vec<Value> {
    let output = cli()
        .arg("--config")
        .arg(config)
        .arg("session")
        .write_stdin(input)
        .output()
        .expect("Failed to run session");
    assert!(output.status.success(), "session failed: {:?}", output);

    String::from_utf8(output.stdout)
        .expect("stdout not utf-8")
        .lines()
        .map(|l| serde_json::from_str(l).expect("response is not JSON"))
        .collect()
}

const PROFILE: &str = r#"{"op":"set_profile","name":"Asha","regn_id":"R-001","age":"28","gender":"M","height":"180","weight":"75"}"#;

#[test]
fn test_full_session_flow() {
    let temp_dir = setup_test_dir();
    let config = write_config(temp_dir.path(), "");

    let input = [
        PROFILE,
        r#"{"op":"add_workout","category":"Warm-up","exercise":"Jumping Jacks","duration":10}"#,
        r#"{"op":"add_workout","category":"Workout","exercise":"Squats","duration":"20"}"#,
        r#"{"op":"add_workout","category":"Cool-down","exercise":"Stretching","duration":15}"#,
        r#"{"op":"get_stats"}"#,
    ]
    .join("\n");

    let responses = run_session(&config, &input);
    assert_eq!(responses.len(), 5);
    assert!(responses.iter().all(|r| r["status"] == "success"));

    assert_eq!(responses[0]["data"]["bmr"], 1740.0);
    assert_eq!(responses[4]["data"]["durations"], serde_json::json!([10, 20, 15]));
    assert_eq!(responses[4]["data"]["total_time"], 45);
}

#[test]
fn test_workout_before_profile_is_rejected() {
    let temp_dir = setup_test_dir();
    let config = write_config(temp_dir.path(), "");

    let input = [
        r#"{"op":"add_workout","category":"Workout","exercise":"Squats","duration":20}"#,
        r#"{"op":"get_workouts"}"#,
    ]
    .join("\n");

    let responses = run_session(&config, &input);
    assert_eq!(responses[0]["status"], "error");
    assert_eq!(responses[0]["code"], "precondition_failed");
    assert_eq!(responses[0]["http_status"], 400);
    assert_eq!(responses[1]["data"]["total_time"], 0);
}

#[test]
fn test_blank_and_comment_lines_skipped() {
    let temp_dir = setup_test_dir();
    let config = write_config(temp_dir.path(), "");

    let input = format!("# set up\n\n{}\n\n", PROFILE);
    let responses = run_session(&config, &input);
    assert_eq!(responses.len(), 1);
}

#[test]
fn test_malformed_line_does_not_abort_session() {
    let temp_dir = setup_test_dir();
    let config = write_config(temp_dir.path(), "");

    let input = format!("{{ not json\n{}\n", PROFILE);
    let responses = run_session(&config, &input);
    assert_eq!(responses[0]["code"], "validation_error");
    assert_eq!(responses[1]["status"], "success");
}

#[test]
fn test_flat_variant_from_config() {
    let temp_dir = setup_test_dir();
    let config = write_config(
        temp_dir.path(),
        "bucketing = \"flat\"\nrequire_profile_for_calories = false",
    );

    let input = [
        r#"{"op":"add_workout","workout":"Push-ups","duration":30}"#,
        r#"{"op":"add_workout","workout":"Squats","duration":"invalid"}"#,
        r#"{"op":"delete_workout","id":1}"#,
        r#"{"op":"get_workouts"}"#,
    ]
    .join("\n");

    let responses = run_session(&config, &input);
    assert_eq!(responses[0]["message"], "'Push-ups' added successfully!");
    assert_eq!(responses[1]["status"], "error");
    assert_eq!(responses[2]["data"]["removed"], 1);
    assert_eq!(responses[3]["data"]["workouts"], serde_json::json!([]));
}

#[test]
fn test_session_from_input_file_with_export() {
    let temp_dir = setup_test_dir();
    let config = write_config(temp_dir.path(), "");
    let input_path = temp_dir.path().join("requests.jsonl");
    fs::write(
        &input_path,
        [
            PROFILE,
            r#"{"op":"add_workout","category":"Workout","exercise":"Burpees","duration":30}"#,
        ]
        .join("\n"),
    )
    .expect("Failed to write input");

    cli()
        .arg("--config")
        .arg(&config)
        .arg("session")
        .arg("--input")
        .arg(&input_path)
        .arg("--export")
        .assert()
        .success()
        .stderr(predicate::str::contains("Exported 1 workouts"));

    let exports = temp_dir.path().join("exports");
    let csv = fs::read_to_string(exports.join("workouts.csv")).expect("Failed to read CSV");
    assert!(csv.starts_with("id,date,timestamp,category,exercise,duration_minutes,calories"));
    assert!(csv.contains("Burpees,30,236.25"));

    let report: Value = serde_json::from_str(
        &fs::read_to_string(exports.join("report.json")).expect("Failed to read report"),
    )
    .expect("Report is not JSON");
    assert_eq!(report["total_time"], 30);
    assert_eq!(report["profile"]["name"], "Asha");
}

#[test]
fn test_export_dir_override() {
    let temp_dir = setup_test_dir();
    let config = write_config(temp_dir.path(), "");
    let override_dir = temp_dir.path().join("elsewhere");

    cli()
        .arg("--config")
        .arg(&config)
        .arg("--export-dir")
        .arg(&override_dir)
        .arg("session")
        .arg("--export")
        .write_stdin(PROFILE)
        .assert()
        .success();

    // Empty ledger writes no CSV, but the report is always written
    assert!(!override_dir.join("workouts.csv").exists());
    assert!(override_dir.join("report.json").exists());
}

#[test]
fn test_export_without_profile_fails() {
    let temp_dir = setup_test_dir();
    let config = write_config(temp_dir.path(), "");

    cli()
        .arg("--config")
        .arg(&config)
        .arg("--no-calories")
        .arg("session")
        .arg("--export")
        .write_stdin(r#"{"op":"add_workout","category":"Workout","exercise":"Squats","duration":20}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Precondition failed: profile required"));

    let exports = temp_dir.path().join("exports");
    assert!(!exports.join("report.json").exists());
    assert!(!exports.join("workouts.csv").exists());
}

#[test]
fn test_export_without_calories_has_positive_zero_totals() {
    let temp_dir = setup_test_dir();
    let config = write_config(temp_dir.path(), "require_profile_for_calories = false");

    let input = [
        PROFILE,
        r#"{"op":"add_workout","category":"Workout","exercise":"Squats","duration":20}"#,
    ]
    .join("\n");

    cli()
        .arg("--config")
        .arg(&config)
        .arg("session")
        .arg("--export")
        .write_stdin(input)
        .assert()
        .success();

    let report = fs::read_to_string(temp_dir.path().join("exports").join("report.json"))
        .expect("Failed to read report");
    assert!(!report.contains("-0.0"));
    let report: Value = serde_json::from_str(&report).expect("Report is not JSON");
    assert_eq!(report["total_time"], 20);
}

#[test]
fn test_no_calories_flag() {
    let temp_dir = setup_test_dir();
    let config = write_config(temp_dir.path(), "");

    let output = cli()
        .arg("--config")
        .arg(&config)
        .arg("--no-calories")
        .arg("session")
        .write_stdin(r#"{"op":"add_workout","category":"Workout","exercise":"Squats","duration":20}"#)
        .output()
        .expect("Failed to run session");

    let response: Value =
        serde_json::from_slice(&output.stdout).expect("response is not JSON");
    assert_eq!(response["status"], "success");
    assert!(response["data"]["workout"].get("calories").is_none());
}
