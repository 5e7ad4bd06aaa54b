// Integration tests for CLI commands
// These run the built binary against snapshot and proposal files in a temp
// directory and check stdout, stderr and the exit status.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_constitution"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

fn write(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path.to_string_lossy().to_string()
}

/// Five active members, one operator, one retired member.
fn write_snapshot(dir: &Path) -> String {
    write(
        dir,
        "members.json",
        r#"{
            "members_info": {
                "m0": {"status": "Active"},
                "m1": {"status": "Active"},
                "m2": {"status": "Active"},
                "m3": {"status": "Active"},
                "m4": {"status": "Active", "member_data": {"team": "audit"}},
                "op": {"status": "Active", "member_data": {"is_operator": true}},
                "old": {"status": "Retired"}
            },
            "encryption_public_keys": {
                "m0": "-----BEGIN PUBLIC KEY-----"
            }
        }"#,
    )
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[test]
fn test_cli_help() {
    let output = run(&["--help"]);

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("Governance proposal resolver"));
    assert!(stdout.contains("resolve"));
    assert!(stdout.contains("classify"));
    assert!(stdout.contains("members"));
    assert!(stdout.contains("init"));
    assert!(stdout.contains("version"));
}

#[test]
fn test_cli_version() {
    let output = run(&["version"]);

    assert!(output.status.success());
    assert!(stdout(&output).starts_with("constitution "));
}

#[test]
fn test_cli_resolve_majority() {
    let temp_dir = TempDir::new().unwrap();
    let store = write_snapshot(temp_dir.path());
    let proposal = write(
        temp_dir.path(),
        "proposal.json",
        r#"{"actions": [{"name": "set_constitution", "args": {"constitution": ""}}]}"#,
    );
    let votes = write(
        temp_dir.path(),
        "votes.json",
        r#"[
            {"member_id": "m0", "vote": true},
            {"member_id": "m1", "vote": true},
            {"member_id": "m2", "vote": true},
            {"member_id": "m3", "vote": false}
        ]"#,
    );

    let output = run(&[
        "resolve", "--proposal", &proposal, "--proposer", "m0", "--votes", &votes, "--store",
        &store,
    ]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "Accepted");
}

#[test]
fn test_cli_resolve_open_without_votes() {
    let temp_dir = TempDir::new().unwrap();
    let store = write_snapshot(temp_dir.path());
    let proposal = write(
        temp_dir.path(),
        "proposal.json",
        r#"{"actions": [{"name": "set_user_data", "args": {}}]}"#,
    );

    let output = run(&[
        "resolve", "--proposal", &proposal, "--proposer", "op", "--store", &store,
    ]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "Open");
}

#[test]
fn test_cli_resolve_explain() {
    let temp_dir = TempDir::new().unwrap();
    let store = write_snapshot(temp_dir.path());
    let proposal = write(
        temp_dir.path(),
        "proposal.json",
        r#"{"actions": [{"name": "trigger_snapshot"}]}"#,
    );

    let output = run(&[
        "resolve",
        "--proposal",
        &proposal,
        "--proposer",
        "op",
        "--store",
        &store,
        "--explain",
    ]);

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["verdict"], "Accepted");
    assert_eq!(report["path"], "OperatorFastPath");
    assert_eq!(report["tally"]["active_members"], 5);
    assert_eq!(report["operator_change"], true);
    assert_eq!(report["proposer_is_operator"], true);
}

#[test]
fn test_cli_resolve_uses_config_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let store = write_snapshot(temp_dir.path());
    let config = temp_dir.path().join("config.toml");
    let proposal = write(
        temp_dir.path(),
        "proposal.json",
        r#"{"actions": [{"name": "set_node_data"}]}"#,
    );

    let init = run(&[
        "--config",
        &config.to_string_lossy(),
        "init",
        "--snapshot",
        &store,
    ]);
    assert!(init.status.success());
    assert!(config.exists());

    let output = run(&[
        "resolve",
        "--proposal",
        &proposal,
        "--proposer",
        "op",
        "--config",
        &config.to_string_lossy(),
    ]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "Accepted");
}

#[test]
fn test_cli_init_refuses_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    let config = write(temp_dir.path(), "config.toml", "");

    let output = run(&["--config", &config, "init", "--snapshot", "members.json"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("already exists"));
}

#[test]
fn test_cli_resolve_missing_store_fails() {
    let temp_dir = TempDir::new().unwrap();
    let proposal = write(temp_dir.path(), "proposal.json", r#"{"actions": []}"#);
    let missing: PathBuf = temp_dir.path().join("absent.json");

    let output = run(&[
        "resolve",
        "--proposal",
        &proposal,
        "--proposer",
        "op",
        "--store",
        &missing.to_string_lossy(),
    ]);

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));
}

#[test]
fn test_cli_resolve_requires_proposer() {
    let output = run(&["resolve", "--proposal", "p.json"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("proposer") || stderr.contains("required"));
}

#[test]
fn test_cli_classify() {
    let temp_dir = TempDir::new().unwrap();
    let store = write_snapshot(temp_dir.path());
    let proposal = write(
        temp_dir.path(),
        "proposal.json",
        r#"{"actions": [{"name": "set_user"}, {"name": "set_constitution"}]}"#,
    );

    let output = run(&["classify", "--proposal", &proposal, "--store", &store]);

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("1. set_user: operator-safe (allowlisted)"));
    assert!(stdout.contains("2. set_constitution: requires member majority"));
    assert!(stdout.contains("Operator change: no"));
}

#[test]
fn test_cli_members() {
    let temp_dir = TempDir::new().unwrap();
    let store = write_snapshot(temp_dir.path());

    let output = run(&["members", "--store", &store]);

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("m0  status=Active  operator=false  recovery=true"));
    assert!(stdout.contains("old  status=Retired  operator=false  recovery=false"));
    assert!(stdout.contains("op  status=Active  operator=true  recovery=false"));
    assert!(stdout.contains("7 members, 5 active non-operators, majority needs more than 2 votes"));
}
