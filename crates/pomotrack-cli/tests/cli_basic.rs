//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. Each test points
//! HOME at its own temporary directory so the config and database stay
//! isolated.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str], stdin: Option<&str>) -> (String, String, i32) {
    let mut child = Command::new("cargo")
        .args(["run", "-q", "-p", "pomotrack-cli", "--"])
        .args(args)
        .env("HOME", home)
        .env_remove("POMOTRACK_ENV")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    {
        let mut pipe = child.stdin.take().expect("stdin is piped");
        if let Some(input) = stdin {
            pipe.write_all(input.as_bytes()).expect("write stdin");
        }
    }

    let output = child.wait_with_output().expect("wait for CLI");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_ok(home: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(home, args, None);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    stdout
}

fn list(home: &Path) -> Vec<serde_json::Value> {
    let stdout = run_ok(home, &["list"]);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("list prints JSON");
    parsed.as_array().expect("list prints an array").clone()
}

#[test]
fn test_help() {
    let home = tempfile::tempdir().unwrap();
    let stdout = run_ok(home.path(), &["--help"]);
    assert!(stdout.contains("track"));
    assert!(stdout.contains("stats"));
}

#[test]
fn test_list_empty() {
    let home = tempfile::tempdir().unwrap();
    assert!(list(home.path()).is_empty());
}

#[test]
fn test_add_then_list_and_remove() {
    let home = tempfile::tempdir().unwrap();
    let added = run_ok(
        home.path(),
        &[
            "add",
            "--start",
            "2024-05-13T09:00:00Z",
            "--finish",
            "2024-05-13T09:25:00Z",
        ],
    );
    let added: serde_json::Value = serde_json::from_str(&added).unwrap();
    assert_eq!(added["seconds_duration"], 1500);

    let records = list(home.path());
    assert_eq!(records.len(), 1);
    let id = records[0]["id"].as_i64().unwrap().to_string();

    run_ok(home.path(), &["remove", &id]);
    assert!(list(home.path()).is_empty());
}

#[test]
fn test_add_rejects_reversed_range() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(
        home.path(),
        &[
            "add",
            "--start",
            "2024-05-13T10:00:00Z",
            "--finish",
            "2024-05-13T09:00:00Z",
        ],
        None,
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_remove_unknown_id_fails() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["remove", "42"], None);
    assert_eq!(code, 1);
    assert!(stderr.contains("not found"), "stderr: {stderr}");
}

#[test]
fn test_track_records_one_pomodoro() {
    let home = tempfile::tempdir().unwrap();
    let input = "focus active\nbreak active\n# comment\nnonsense\nfocus pause\nfocus resume\n";
    let (stdout, stderr, code) = run_cli(home.path(), &["track"], Some(input));
    assert_eq!(code, 0, "track failed: {stderr}");
    assert!(stdout.contains("\"finished\""), "stdout: {stdout}");

    let records = list(home.path());
    assert_eq!(records.len(), 1);
}

#[test]
fn test_stats_json() {
    let home = tempfile::tempdir().unwrap();
    run_ok(
        home.path(),
        &[
            "add",
            "--start",
            "2024-05-13T09:00:00Z",
            "--finish",
            "2024-05-13T10:30:00Z",
        ],
    );

    let stdout = run_ok(home.path(), &["stats"]);
    let summary: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(summary["pomodoros"], 1);
    assert_eq!(summary["total_hours"], 1.5);
    assert_eq!(summary["active_days"], 1);

    let today: serde_json::Value =
        serde_json::from_str(&run_ok(home.path(), &["stats", "--today"])).unwrap();
    assert_eq!(today["pomodoros"], 0);
}

#[test]
fn test_config_get_set_show() {
    let home = tempfile::tempdir().unwrap();
    assert_eq!(run_ok(home.path(), &["config", "get", "logging.filter"]).trim(), "info");

    run_ok(home.path(), &["config", "set", "storage.database_file", "work.db"]);
    assert_eq!(
        run_ok(home.path(), &["config", "get", "storage.database_file"]).trim(),
        "work.db"
    );

    let shown: serde_json::Value =
        serde_json::from_str(&run_ok(home.path(), &["config", "show"])).unwrap();
    assert_eq!(shown["storage"]["database_file"], "work.db");

    let (_, _, code) = run_cli(home.path(), &["config", "get", "ui.dark_mode"], None);
    assert_eq!(code, 1);
}
