//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data
//! directory and checks the JSON it prints.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_focuslog"))
        .args(args)
        .env("FOCUSLOG_DATA_DIR", data_dir)
        .env_remove("FOCUSLOG_ENV")
        .env("FOCUSLOG_LOG", "warn")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_cli_success(data_dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert_eq!(code, 0, "CLI command failed: {args:?}\nstderr: {stderr}");
    stdout
}

fn run_json(data_dir: &Path, args: &[&str]) -> serde_json::Value {
    let stdout = run_cli_success(data_dir, args);
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_status_on_fresh_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    let status = run_json(dir.path(), &["clock", "status"]);
    assert_eq!(status["type"], "StateSnapshot");
    assert_eq!(status["mode"], "countdown");
    assert_eq!(status["state"], "idle");
    assert_eq!(status["display"], "25:00");
    assert_eq!(status["tag"], "Other");
    assert!(dir.path().join("config.toml").exists());
}

#[test]
fn test_start_without_task_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["clock", "start"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("task label is empty"), "stderr: {stderr}");
}

#[test]
fn test_countdown_runs_to_completion_under_watch() {
    let dir = tempfile::tempdir().unwrap();
    run_cli_success(dir.path(), &["tag", "add", "Chores"]);
    run_cli_success(dir.path(), &["clock", "duration", "0", "2"]);
    let started = run_json(
        dir.path(),
        &["clock", "start", "--task", "kettle", "--tag", "Chores"],
    );
    assert_eq!(started["type"], "ClockStarted");
    assert_eq!(started["duration_secs"], 2);

    let watched = run_cli_success(dir.path(), &["clock", "watch"]);
    assert!(watched.contains("\"CountdownFinished\""), "stdout: {watched}");
    assert!(watched.contains("\"SessionRecorded\""), "stdout: {watched}");

    let sessions = run_json(dir.path(), &["session", "list"]);
    let sessions = sessions.as_array().unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["task_label"], "kettle");
    assert_eq!(sessions[0]["tag"], "Chores");
    assert_eq!(sessions[0]["duration_secs"], 2);
    assert_eq!(sessions[0]["duration"], "2s");

    let summary = run_json(dir.path(), &["stats", "summary"]);
    assert_eq!(summary["session_count"], 1);
    assert_eq!(summary["total_secs"], 2);

    let status = run_json(dir.path(), &["clock", "status"]);
    assert_eq!(status["state"], "idle");
    assert_eq!(status["task_label"], "");
}

#[test]
fn test_pause_resume_and_stop_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    run_cli_success(dir.path(), &["clock", "mode", "stopwatch"]);
    run_cli_success(dir.path(), &["clock", "task", "notes"]);
    run_json(dir.path(), &["clock", "start"]);

    let paused = run_json(dir.path(), &["clock", "pause"]);
    assert_eq!(paused["type"], "ClockPaused");
    assert_eq!(paused["mode"], "stopwatch");

    let (_, stderr, code) = run_cli(dir.path(), &["clock", "pause"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("stopwatch is paused"), "stderr: {stderr}");

    run_json(dir.path(), &["clock", "resume"]);
    let stopped = run_json(dir.path(), &["clock", "stop"]);
    assert_eq!(stopped[0]["type"], "ClockStopped");

    let (_, _, code) = run_cli(dir.path(), &["clock", "stop"]);
    assert_eq!(code, 1);
}

#[test]
fn test_tag_add_list_remove() {
    let dir = tempfile::tempdir().unwrap();
    run_cli_success(dir.path(), &["tag", "add", "Work"]);
    let unchanged = run_json(dir.path(), &["tag", "add", "Work"]);
    assert_eq!(unchanged, serde_json::json!(["Other", "Work"]));
    let unchanged = run_json(dir.path(), &["tag", "add", "  "]);
    assert_eq!(unchanged, serde_json::json!(["Other", "Work"]));

    let tags = run_json(dir.path(), &["tag", "list"]);
    let tags = tags.as_array().unwrap();
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0]["tag"], "Other");
    assert_eq!(tags[0]["default"], true);
    assert_eq!(tags[1]["tag"], "Work");

    let removed = run_json(dir.path(), &["tag", "remove", "Work"]);
    assert_eq!(removed["sessions_moved"], 0);
    let (_, _, code) = run_cli(dir.path(), &["tag", "remove", "Other"]);
    assert_eq!(code, 1);
}

#[test]
fn test_config_set_get_and_unknown_key() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(
        run_cli_success(dir.path(), &["config", "get", "countdown.default_minutes"]).trim(),
        "25"
    );
    run_cli_success(dir.path(), &["config", "set", "countdown.default_minutes", "45"]);
    assert_eq!(
        run_cli_success(dir.path(), &["config", "get", "countdown.default_minutes"]).trim(),
        "45"
    );
    let status = run_json(dir.path(), &["clock", "status"]);
    assert_eq!(status["display"], "45:00");

    let (_, stderr, code) = run_cli(dir.path(), &["config", "set", "countdown.nope", "1"]);
    assert_eq!(code, 1);
    assert!(stderr.starts_with("error:"), "stderr: {stderr}");
}

#[test]
fn test_stats_on_empty_log() {
    let dir = tempfile::tempdir().unwrap();
    let daily = run_json(dir.path(), &["stats", "daily", "--days", "3"]);
    assert_eq!(daily.as_array().unwrap().len(), 3);
    let dist = run_json(dir.path(), &["stats", "distribution"]);
    assert!(dist.as_array().unwrap().is_empty());
    let dash = run_json(dir.path(), &["stats", "dashboard"]);
    assert_eq!(dash["summary"]["average_secs"], 0);
    assert_eq!(dash["daily"].as_array().unwrap().len(), 7);
}

#[test]
fn test_completions_bash() {
    let dir = tempfile::tempdir().unwrap();
    let script = run_cli_success(dir.path(), &["completions", "bash"]);
    assert!(script.contains("focuslog"));
}
