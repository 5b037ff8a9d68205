//! Integration tests for the fitlog binary.
//!
//! These tests verify end-to-end behavior including:
//! - One-shot calculators
//! - Reference charts
//! - Config file handling

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create a test directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("fitlog"))
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Personal fitness tracker"));
}

#[test]
fn test_calc_bmi() {
    cli()
        .args(["calc", "bmi", "--height", "180", "--weight", "75"])
        .assert()
        .success()
        .stdout(predicate::str::contains("BMI: 23.15 (Normal)"));
}

#[test]
fn test_calc_bmr() {
    cli()
        .args([
            "calc", "bmr", "--age", "28", "--gender", "M", "--height", "180", "--weight", "75",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("BMR: 1740.00 kcal/day"));
}

#[test]
fn test_calc_calories_defaults_to_workout_met() {
    cli()
        .args(["calc", "calories", "--weight", "70", "--duration", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Calories: 220.50 kcal"));
}

#[test]
fn test_calc_calories_by_category() {
    cli()
        .args([
            "calc",
            "calories",
            "--category",
            "Cool-down",
            "--weight",
            "80",
            "--duration",
            "15",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Calories: 52.50 kcal"));
}

#[test]
fn test_calc_rejects_zero_height() {
    cli()
        .args(["calc", "bmi", "--height", "0", "--weight", "75"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("InvalidInput"));
}

#[test]
fn test_calc_rejects_unknown_gender() {
    cli()
        .args([
            "calc", "bmr", "--age", "28", "--gender", "X", "--height", "180", "--weight", "75",
        ])
        .assert()
        .failure();
}

#[test]
fn test_workout_chart() {
    cli()
        .args(["chart", "workout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Warm-up"))
        .stdout(predicate::str::contains("Cool-down"));
}

#[test]
fn test_diet_chart() {
    cli()
        .args(["chart", "diet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Muscle Gain"));
}

#[test]
fn test_unknown_chart_fails() {
    cli().args(["chart", "sleep"]).assert().failure();
}

#[test]
fn test_invalid_config_file_fails() {
    let temp_dir = setup_test_dir();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[ledger\nbucketing = ").expect("Failed to write config");

    cli()
        .arg("--config")
        .arg(&config_path)
        .args(["chart", "diet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Toml"));
}

#[test]
fn test_unknown_bucketing_fails() {
    cli()
        .args(["--bucketing", "weekly", "chart", "diet"])
        .assert()
        .failure();
}
