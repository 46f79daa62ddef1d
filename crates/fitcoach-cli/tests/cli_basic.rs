//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway data directory and
//! verify JSON outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (exit code, stdout, stderr).
fn run_cli(data_dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_fitcoach-cli"))
        .args(args)
        .env("FITCOACH_DATA_DIR", data_dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn run_json(data_dir: &Path, args: &[&str]) -> serde_json::Value {
    let (code, stdout, stderr) = run_cli(data_dir, args);
    assert_eq!(code, 0, "CLI command failed: {:?}\n{}", args, stderr);
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_appointment_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path();

    let created = run_json(
        data,
        &[
            "appointment",
            "create",
            "--trainer",
            "t1",
            "--client",
            "c1",
            "--title",
            "Intro session",
            "--start",
            "2024-06-20T10:00:00",
            "--end",
            "2024-06-20T11:00:00",
        ],
    );
    assert_eq!(created["status"], "scheduled");
    let id = created["id"].as_str().unwrap().to_string();

    let on_day = run_json(data, &["appointment", "by-date", "2024-06-20"]);
    assert_eq!(on_day.as_array().unwrap().len(), 1);

    run_json(data, &["appointment", "cancel", &id]);
    let on_day = run_json(data, &["appointment", "by-date", "2024-06-20"]);
    assert_eq!(on_day[0]["status"], "cancelled");

    let updated = run_json(data, &["appointment", "update", &id, "--location", "Park"]);
    assert_eq!(updated["location"], "Park");
    assert_eq!(updated["title"], "Intro session");

    run_json(data, &["appointment", "delete", &id]);
    let (code, _, stderr) = run_cli(data, &["appointment", "delete", &id]);
    assert_eq!(code, 1);
    assert!(stderr.contains("not found"));
}

#[test]
fn test_by_date_rejects_bad_date() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["appointment", "by-date", "someday"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Invalid input"));
}

#[test]
fn test_full_day_block_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path();

    let block = run_json(
        data,
        &["availability", "block-day", "--trainer", "t1", "2024-03-01"],
    );
    assert_eq!(block["isFullDay"], true);
    assert_eq!(block["reason"], "Not available");

    let blocked = run_json(
        data,
        &["availability", "day-blocked", "--trainer", "t1", "2024-03-01"],
    );
    assert_eq!(blocked["fullyBlocked"], true);

    let slots = run_json(data, &["availability", "slots", "--trainer", "t1", "2024-03-01"]);
    assert!(slots.as_array().unwrap().is_empty());

    run_json(
        data,
        &["availability", "unblock-day", "--trainer", "t1", "2024-03-01"],
    );
    let (code, _, _) = run_cli(
        data,
        &["availability", "unblock-day", "--trainer", "t1", "2024-03-01"],
    );
    assert_eq!(code, 1);
}

#[test]
fn test_streak_commands() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path();

    let first = run_json(data, &["streak", "check-in", "u1"]);
    let second = run_json(data, &["streak", "check-in", "u1"]);
    assert_eq!(first["date"], second["date"]);

    let streak = run_json(data, &["streak", "show", "u1"]);
    assert_eq!(streak["streak"], 1);
    assert_eq!(run_json(data, &["streak", "today", "u1"])["checkedIn"], true);

    run_json(data, &["streak", "reset", "u1"]);
    assert_eq!(run_json(data, &["streak", "show", "u1"])["streak"], 0);
    assert_eq!(run_json(data, &["streak", "today", "u1"])["checkedIn"], false);
    assert!(run_json(data, &["streak", "last", "u1"])["lastCheckIn"].is_null());
}

#[test]
fn test_config_get_set() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path();

    let (code, stdout, _) = run_cli(data, &["config", "get", "availability.working_hour_start"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "9");

    let (code, _, _) = run_cli(data, &["config", "set", "availability.working_hour_start", "7"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(data, &["config", "get", "availability.working_hour_start"]);
    assert_eq!(stdout.trim(), "7");

    let (code, _, stderr) = run_cli(data, &["config", "get", "availability.bogus"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown config key"));
}

#[test]
fn test_malformed_config_warns_and_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path();
    std::fs::write(data.join("config.toml"), "[availability\nworking_hour_start = ").unwrap();

    let (code, stdout, stderr) = run_cli(data, &["streak", "show", "u1"]);
    assert_eq!(code, 0, "{stderr}");
    assert!(stderr.contains("using default configuration"), "{stderr}");
    let streak: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(streak["streak"], 0);
}

#[test]
fn test_slots_reject_oversized_duration() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(
        dir.path(),
        &["availability", "slots", "--trainer", "t1", "2024-06-20", "--duration", "1000000000000"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("Invalid input"), "{stderr}");
}
