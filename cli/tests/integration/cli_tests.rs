//! CLI structure, argument parsing and shared fixtures.

#![allow(clippy::expect_used)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Configuration enabling only the `mock` provider with three remote instances.
const MOCK_CONFIG: &str = "\
defaults:
  cloud: mock
aws:
  enabled: false
mock:
  enabled: true
  instances:
    i-1234: stopped
    i-5678: running
    i-9999: terminated
";

/// Isolated config + registry files for one test.
pub struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        std::fs::write(dir.path().join("config.yaml"), MOCK_CONFIG).expect("write config");
        Self { dir }
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.yaml")
    }

    pub fn db_path(&self) -> PathBuf {
        self.dir.path().join("instances.db.json")
    }

    /// An `instances` command bound to this sandbox.
    pub fn cmd(&self) -> Command {
        let mut cmd = instances();
        cmd.env("INSTANCES_CONFIG", self.config_path())
            .env("INSTANCES_DB", self.db_path())
            .env_remove("INSTANCES_LOG");
        cmd
    }

    /// Run `instances <args>` and require success.
    pub fn ok(&self, args: &[&str]) {
        self.cmd().args(args).assert().success();
    }

    pub fn registry_json(&self) -> serde_json::Value {
        read_json(&self.db_path())
    }
}

pub fn read_json(path: &Path) -> serde_json::Value {
    let content = std::fs::read_to_string(path).expect("read");
    serde_json::from_str(&content).expect("valid JSON")
}

pub fn instances() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("instances"));
    cmd.env("NO_COLOR", "1");
    cmd
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_help() {
    // An env-backed flag counts as an argument, so NO_COLOR must be unset
    // for arg_required_else_help to print the help text.
    instances()
        .env_remove("NO_COLOR")
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "Track and control cloud compute instances by name",
        ));
}

#[test]
fn test_no_color_accepts_any_non_empty_value() {
    let sandbox = Sandbox::new();
    for value in ["1", "yes", "true"] {
        sandbox
            .cmd()
            .env("NO_COLOR", value)
            .arg("list")
            .assert()
            .success()
            .stdout(predicate::str::contains("No instances tracked"));
    }
}

#[test]
fn test_no_color_falsey_value_is_accepted() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .env("NO_COLOR", "0")
        .args(["version", "--json"])
        .assert()
        .success();
}

#[test]
fn test_cli_help_lists_commands() {
    let assert = instances().arg("--help").assert().success();
    let out = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    for command in ["add", "rm", "status", "start", "stop", "list", "config", "version"] {
        assert!(out.contains(command), "help is missing `{command}`");
    }
}

#[test]
fn test_version_command_shows_version() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("instances v0.1.0"));
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["version", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""version": "0.1.0""#));
}

#[test]
fn test_unknown_command_fails() {
    instances().arg("reboot").assert().failure();
}

#[test]
fn test_add_requires_remote_id() {
    instances()
        .arg("add")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("REMOTE_ID"));
}

#[test]
fn test_invalid_config_file_is_reported() {
    let sandbox = Sandbox::new();
    std::fs::write(sandbox.config_path(), "aws: [not, a, map]").expect("write");
    sandbox
        .cmd()
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot parse"));
}

#[test]
fn test_verbose_logs_to_stderr_only() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["-v", "list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{"))
        .stderr(predicate::str::contains("application context ready"));
}
