//! `instances config` show/set against a temporary configuration file.

#![allow(clippy::expect_used)]

use predicates::prelude::*;

use crate::cli_tests::Sandbox;

#[test]
fn test_config_show_lists_enabled_providers() {
    let sandbox = Sandbox::new();
    let assert = sandbox
        .cmd()
        .args(["config", "show", "--json"])
        .assert()
        .success();
    let out: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("JSON");
    assert_eq!(out["providers"], serde_json::json!(["mock"]));
    assert_eq!(out["config"]["defaults"]["cloud"], "mock");
}

#[test]
fn test_config_show_human_names_file_and_providers() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration ("))
        .stdout(predicate::str::contains("config.yaml"))
        .stdout(predicate::str::contains("mock"));
}

#[test]
fn test_config_set_persists_value() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["config", "set", "aws.region", "eu-west-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set aws.region = eu-west-1"));

    let content = std::fs::read_to_string(sandbox.config_path()).expect("read");
    assert!(content.contains("eu-west-1"));
    assert!(content.contains("i-1234"), "other settings are kept");
}

#[test]
fn test_config_set_unknown_key_fails_with_code() {
    let sandbox = Sandbox::new();
    let before = std::fs::read_to_string(sandbox.config_path()).expect("read");
    let assert = sandbox
        .cmd()
        .args(["--json", "config", "set", "security.level", "strict"])
        .assert()
        .code(1);
    let out: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("JSON error object");
    assert_eq!(out["code"], "UNKNOWN_SETTING");
    let after = std::fs::read_to_string(sandbox.config_path()).expect("read");
    assert_eq!(before, after);
}

#[test]
fn test_config_set_invalid_value_fails() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["config", "set", "aws.timeout_secs", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid value for aws.timeout_secs"));
}

#[test]
fn test_enabling_aws_changes_provider_list() {
    let sandbox = Sandbox::new();
    sandbox.ok(&["config", "set", "aws.enabled", "true"]);
    let assert = sandbox
        .cmd()
        .args(["config", "show", "--json"])
        .assert()
        .success();
    let out: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("JSON");
    assert_eq!(out["providers"], serde_json::json!(["aws", "mock"]));
}
