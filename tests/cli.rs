//! Integration tests for the cyclecast binary.
//!
//! These tests verify end-to-end behavior including:
//! - Forecast output for a known history
//! - Insufficient-data responses
//! - Boundary validation errors
//! - Config file handling

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const HISTORY: &str = r#"[
    {"startDate": "2024-01-01", "duration": 28},
    {"startDate": "2024-01-29", "duration": 30},
    {"startDate": "2024-02-28", "duration": 26}
]"#;

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("cyclecast"))
}

/// Write a file into the temp dir and return its path
fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("Failed to write test file");
    path
}

/// Temp dir holding an empty (all defaults) config file
fn setup() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = write_file(&dir, "config.toml", "");
    (dir, config)
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Forecast cycle events from recorded cycle history",
        ));
}

#[test]
fn test_predict_reference_history() {
    let (dir, config) = setup();
    let input = write_file(&dir, "history.json", HISTORY);

    let output = cli()
        .arg("--config")
        .arg(&config)
        .args(["predict", "--today", "2024-03-10", "--output-format", "json", "-i"])
        .arg(&input)
        .output()
        .unwrap();

    assert!(output.status.success());
    let payload: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(payload["nextPeriodDate"], "2024-03-27");
    assert_eq!(payload["currentPhase"], "Follicular Phase");
    assert_eq!(payload["ovulationStatus"], "Ovulation approaching");
    assert_eq!(payload["pregnancyChance"], "High");
    assert_eq!(payload["daysBeforePeriod"], "16 days until period");
    assert_eq!(payload["cycleStatistics"]["nextPredictedDate"], "2024-03-27");
}

#[test]
fn test_predict_is_deterministic() {
    let (dir, config) = setup();
    let input = write_file(&dir, "history.json", HISTORY);

    let run = || {
        cli()
            .arg("--config")
            .arg(&config)
            .args(["predict", "--today", "2024-03-10", "-i"])
            .arg(&input)
            .output()
            .unwrap()
            .stdout
    };

    assert_eq!(run(), run());
}

#[test]
fn test_predict_from_stdin_ndjson() {
    let (_dir, config) = setup();
    let ndjson = "{\"startDate\":\"2024-01-01\",\"duration\":28}\n\
                  {\"startDate\":\"2024-01-29\",\"duration\":30}\n\
                  {\"startDate\":\"2024-02-28\",\"duration\":26}\n";

    cli()
        .arg("--config")
        .arg(&config)
        .args([
            "predict",
            "--today",
            "2024-03-10",
            "--input-format",
            "ndjson",
            "--output-format",
            "json",
            "-i",
            "-",
        ])
        .write_stdin(ndjson)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""nextPeriodDate":"2024-03-27""#));
}

#[test]
fn test_predict_insufficient_data_is_success() {
    let (dir, config) = setup();
    let input = write_file(
        &dir,
        "short.json",
        r#"[{"startDate": "2024-01-01", "duration": 28}]"#,
    );

    cli()
        .arg("--config")
        .arg(&config)
        .args(["predict", "--today", "2024-03-10", "--output-format", "json", "-i"])
        .arg(&input)
        .assert()
        .success()
        .stdout("{\"status\":\"insufficient_data\"}\n");
}

#[test]
fn test_predict_short_history_with_bad_records_is_insufficient() {
    let (dir, config) = setup();
    let input = write_file(
        &dir,
        "short-bad.json",
        r#"[
            {"startDate": "garbage", "duration": 28},
            {"startDate": "2024-01-01", "duration": 0}
        ]"#,
    );

    cli()
        .arg("--config")
        .arg(&config)
        .args(["predict", "--today", "2024-03-10", "--output-format", "json", "-i"])
        .arg(&input)
        .assert()
        .success()
        .stdout("{\"status\":\"insufficient_data\"}\n");
}

#[test]
fn test_predict_invalid_today() {
    let (dir, config) = setup();
    let input = write_file(&dir, "history.json", HISTORY);

    cli()
        .arg("--config")
        .arg(&config)
        .args(["predict", "--today", "03/10/2024", "-i"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("INVALID_DATE"));
}

#[test]
fn test_predict_invalid_record_date() {
    let (dir, config) = setup();
    let input = write_file(
        &dir,
        "bad.json",
        r#"[
            {"startDate": "2024-01-01", "duration": 28},
            {"startDate": "2024-02-30", "duration": 30},
            {"startDate": "2024-02-28", "duration": 26}
        ]"#,
    );

    cli()
        .arg("--config")
        .arg(&config)
        .args(["predict", "--today", "2024-03-10", "-i"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("INVALID_DATE"))
        .stderr(predicate::str::contains("record 1"));
}

#[test]
fn test_predict_history_limit_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_file(
        &dir,
        "config.toml",
        "[forecast]\nhistory_limit = 3\n\n[output]\nformat = \"json\"\n",
    );
    let input = write_file(
        &dir,
        "long.json",
        r#"[
            {"startDate": "2023-11-01", "duration": 40},
            {"startDate": "2023-12-11", "duration": 21},
            {"startDate": "2024-01-01", "duration": 28},
            {"startDate": "2024-01-29", "duration": 30},
            {"startDate": "2024-02-28", "duration": 26}
        ]"#,
    );

    cli()
        .arg("--config")
        .arg(&config)
        .args(["predict", "--today", "2024-03-10", "-i"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""averageLengthDays":28"#));

    // 145 / 5 = 29
    cli()
        .arg("--config")
        .arg(&config)
        .args(["predict", "--today", "2024-03-10", "--history-limit", "0", "-i"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""averageLengthDays":29"#));
}

#[test]
fn test_config_source_is_logged() {
    let (dir, config) = setup();
    let input = write_file(&dir, "history.json", HISTORY);

    cli()
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(&config)
        .args(["--log-level", "info", "predict", "--today", "2024-03-10", "-i"])
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("Loaded config from"));
}

#[test]
fn test_predict_writes_output_file() {
    let (dir, config) = setup();
    let input = write_file(&dir, "history.json", HISTORY);
    let out = dir.path().join("forecast.json");

    cli()
        .arg("--config")
        .arg(&config)
        .args(["predict", "--today", "2024-03-10", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.contains("\"nextPeriodDate\": \"2024-03-27\""));
}

#[test]
fn test_validate_reports_invalid_records() {
    let (dir, config) = setup();
    let input = write_file(
        &dir,
        "mixed.json",
        r#"[
            {"startDate": "2024-01-01", "duration": 28},
            {"startDate": "not-a-date", "duration": 30},
            {"startDate": "2024-02-28", "duration": 0}
        ]"#,
    );

    let output = cli()
        .arg("--config")
        .arg(&config)
        .args(["validate", "--json", "-i"])
        .arg(&input)
        .output()
        .unwrap();

    assert!(!output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["total_records"], 3);
    assert_eq!(report["invalid_records"], 2);
    assert_eq!(report["errors"][0]["index"], 1);
    assert_eq!(report["errors"][1]["index"], 2);
}

#[test]
fn test_validate_accepts_clean_history() {
    let (dir, config) = setup();
    let input = write_file(&dir, "history.json", HISTORY);

    cli()
        .arg("--config")
        .arg(&config)
        .args(["validate", "-i"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid records: 0"));
}

#[test]
fn test_doctor_flags_broken_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_file(&dir, "config.toml", "[forecast\n");

    cli()
        .arg("--config")
        .arg(&config)
        .args(["doctor", "--json"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"Error\""));
}

#[test]
fn test_broken_config_fails_predict() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_file(&dir, "config.toml", "[output]\nformat = \"yaml\"\n");
    let input = write_file(&dir, "history.json", HISTORY);

    cli()
        .arg("--config")
        .arg(&config)
        .args(["predict", "--today", "2024-03-10", "-i"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("CONFIG_ERROR"));
}

#[test]
fn test_schema_output_lists_phases() {
    cli()
        .args(["schema", "output"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ovulation Window"));
}
