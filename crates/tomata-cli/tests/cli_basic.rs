//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the dev data
//! directory and verify outputs.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "tomata-cli", "--"])
        .args(args)
        .env("TOMATA_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_stats_show() {
    let (stdout, _, code) = run_cli(&["stats", "show"]);
    assert_eq!(code, 0, "stats show failed");
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(json["todayCount"].is_number());
    assert!(json["totalMinutes"].is_number());
}

#[test]
fn test_presets_list() {
    let (stdout, _, code) = run_cli(&["presets", "list"]);
    assert_eq!(code, 0, "presets list failed");
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(json["work"].is_array());
    assert!(json["break"].is_array());
}

#[test]
fn test_plan_list() {
    let (stdout, _, code) = run_cli(&["plan", "list"]);
    assert_eq!(code, 0, "plan list failed");
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(json.is_array());
}

#[test]
fn test_plan_add_then_remove() {
    let (stdout, _, code) = run_cli(&["plan", "add", "25", "--kind", "work"]);
    assert_eq!(code, 0, "plan add failed");
    let added: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(added["minutes"], 25);
    assert_eq!(added["type"], "work");

    let (stdout, _, _) = run_cli(&["plan", "list"]);
    let list: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let len = list.as_array().unwrap().len();
    assert!(len >= 1);

    let (_, _, code) = run_cli(&["plan", "remove", &(len - 1).to_string()]);
    assert_eq!(code, 0, "plan remove failed");
}

#[test]
fn test_plan_add_rejects_out_of_range() {
    let (_, _, code) = run_cli(&["plan", "add", "0"]);
    assert_ne!(code, 0);
    let (_, _, code) = run_cli(&["plan", "add", "121"]);
    assert_ne!(code, 0);
}

#[test]
fn test_config_get() {
    let (stdout, _, code) = run_cli(&["config", "get", "timer.default_work_min"]);
    assert_eq!(code, 0, "config get failed");
    assert_eq!(stdout.trim(), "25");
}

#[test]
fn test_config_get_unknown_key_fails() {
    let (_, stderr, code) = run_cli(&["config", "get", "timer.no_such_key"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown config key"));
}

#[test]
fn test_config_list() {
    let (stdout, _, code) = run_cli(&["config", "list"]);
    assert_eq!(code, 0, "config list failed");
    assert!(stdout.contains("timer.default_work_min"));
    assert!(stdout.contains("player.exe_path"));
}
