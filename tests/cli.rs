// Author: Eshan Roy
// SPDX-License-Identifier: MIT

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A working directory with an empty config, so the built-in rules apply.
fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("hookwise.toml"), "").unwrap();
    dir
}

fn hookwise(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("hookwise").unwrap();
    cmd.current_dir(dir).env_remove("HOOKWISE_CONFIG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_commit_msg_accepts_valid_message() {
    let dir = workspace();
    fs::write(
        dir.path().join("COMMIT_EDITMSG"),
        "feat(parser): Add footer continuation\n\nFooters may span several lines.\n\nBREAKING CHANGE: Footer values keep their newlines\n",
    )
    .unwrap();

    hookwise(dir.path())
        .args(["hook", "commit-msg", "COMMIT_EDITMSG"])
        .assert()
        .success()
        .stderr(predicate::str::contains("checks passed"));
}

#[test]
fn test_commit_msg_rejects_invalid_subject() {
    let dir = workspace();
    fs::write(dir.path().join("COMMIT_EDITMSG"), "updated some stuff\n").unwrap();

    hookwise(dir.path())
        .args(["hook", "commit-msg", "COMMIT_EDITMSG"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Subject of the commit message is incorrect."));
}

#[test]
fn test_commit_msg_ignores_comment_lines() {
    let dir = workspace();
    fs::write(
        dir.path().join("COMMIT_EDITMSG"),
        "# Please enter the commit message\nfix: Handle empty input\n# On branch main\n",
    )
    .unwrap();

    hookwise(dir.path())
        .args(["hook", "commit-msg", "COMMIT_EDITMSG"])
        .assert()
        .success();
}

#[test]
fn test_commit_msg_missing_file() {
    let dir = workspace();

    hookwise(dir.path())
        .args(["hook", "commit-msg", "NO_SUCH_FILE"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_check_file_json() {
    let dir = workspace();
    fs::write(dir.path().join("msg.txt"), "chore: Bump dependencies\n").unwrap();

    let output = hookwise(dir.path())
        .args(["check", "--file", "msg.txt", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["valid"], true);
    assert_eq!(json["checks"].as_array().unwrap().len(), 4);
}

#[test]
fn test_check_file_reports_missing_blank_line() {
    let dir = workspace();
    fs::write(
        dir.path().join("msg.txt"),
        "fix: Handle empty input\nThe body follows the subject directly.\n",
    )
    .unwrap();

    hookwise(dir.path())
        .args(["check", "--file", "msg.txt"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("blank-line-after-subject"));
}

#[test]
fn test_check_uses_configured_rules() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("hookwise.toml"),
        "[rules.subject.description]\nletter_case = \"lower\"\nmin_length = 5\nmax_length = 70\nmay_end_with_period = false\n",
    )
    .unwrap();
    fs::write(dir.path().join("msg.txt"), "feat: add parser\n").unwrap();

    hookwise(dir.path())
        .args(["check", "--file", "msg.txt"])
        .assert()
        .success();
}

#[test]
fn test_prepare_commit_msg_writes_template() {
    let dir = workspace();
    let path = dir.path().join("COMMIT_EDITMSG");
    fs::write(&path, "# git status\n").unwrap();

    hookwise(dir.path())
        .args(["hook", "prepare-commit-msg", "COMMIT_EDITMSG"])
        .assert()
        .success();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("<type>(optional scope): <description>"));
    assert!(content.ends_with("# git status\n"));
}

#[test]
fn test_prepare_commit_msg_skips_message_source() {
    let dir = workspace();
    let path = dir.path().join("COMMIT_EDITMSG");
    fs::write(&path, "fix: Handle empty input\n").unwrap();

    hookwise(dir.path())
        .args(["hook", "prepare-commit-msg", "COMMIT_EDITMSG", "message"])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&path).unwrap(), "fix: Handle empty input\n");
}

#[test]
fn test_init_creates_config_once() {
    let dir = TempDir::new().unwrap();

    hookwise(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created hookwise.toml"));
    assert!(dir.path().join("hookwise.toml").exists());

    hookwise(dir.path())
        .arg("init")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));

    hookwise(dir.path()).args(["init", "--force"]).assert().success();
}

#[test]
fn test_config_prints_patterns() {
    let dir = workspace();

    hookwise(dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("allowed_types"))
        .stdout(predicate::str::contains("# subject:"));
}
