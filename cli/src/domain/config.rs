//! Domain types and validators for `instances` configuration.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;
use crate::domain::instance::InstanceState;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "defaults.cloud",
    "aws.enabled",
    "aws.region",
    "aws.profile",
    "aws.timeout_secs",
    "mock.enabled",
];
pub const VALID_BOOLS: &[&str] = &["true", "false"];

const DEFAULT_AWS_TIMEOUT_SECS: u64 = 30;

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.instances/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct InstancesConfig {
    /// Registry file location. Defaults to `~/.instances.db.json`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry_path: Option<PathBuf>,
    pub defaults: DefaultsConfig,
    pub aws: AwsConfig,
    pub mock: MockConfig,
}

/// Defaults applied when a command omits an option.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Provider used by `add` when `--cloud` is not given.
    #[serde(default = "default_cloud")]
    pub cloud: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            cloud: default_cloud(),
        }
    }
}

fn default_cloud() -> String {
    "aws".to_string()
}

/// EC2 backend settings. Credentials are never stored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AwsConfig {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    /// Deadline for a single `aws` CLI call.
    pub timeout_secs: u64,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            region: None,
            profile: None,
            timeout_secs: DEFAULT_AWS_TIMEOUT_SECS,
        }
    }
}

/// In-memory reference provider, registered as `mock` when enabled.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MockConfig {
    pub enabled: bool,
    /// Remote ids known to the mock backend and their initial state.
    pub instances: BTreeMap<String, InstanceState>,
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    let invalid = |valid: &str| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        valid: valid.to_string(),
    };
    match key {
        "aws.enabled" | "mock.enabled" if !VALID_BOOLS.contains(&value) => {
            Err(invalid(&VALID_BOOLS.join(", ")).into())
        }
        "aws.timeout_secs" if !matches!(value.parse::<u64>(), Ok(secs) if secs > 0) => {
            Err(invalid("a positive number of seconds").into())
        }
        "defaults.cloud" | "aws.region" | "aws.profile" if value.trim().is_empty() => {
            Err(invalid("a non-empty string").into())
        }
        _ => Ok(()),
    }
}

/// Validate `key`/`value` and write the value into `config`.
///
/// # Errors
///
/// Returns an error if the key is unknown or the value is invalid.
pub fn apply_setting(config: &mut InstancesConfig, key: &str, value: &str) -> Result<()> {
    validate_config_key(key)?;
    validate_config_value(key, value)?;
    match key {
        "defaults.cloud" => config.defaults.cloud = value.to_lowercase(),
        "aws.enabled" => config.aws.enabled = value == "true",
        "aws.region" => config.aws.region = Some(value.to_string()),
        "aws.profile" => config.aws.profile = Some(value.to_string()),
        "aws.timeout_secs" => config.aws.timeout_secs = value.parse()?,
        "mock.enabled" => config.mock.enabled = value == "true",
        _ => anyhow::bail!("Unknown setting: {key}"),
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
