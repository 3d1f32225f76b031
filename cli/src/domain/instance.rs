//! Instance domain types and the persisted registry snapshot.
//!
//! This module is intentionally free of I/O, async, and external layer imports.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A tracked remote instance: the cloud-assigned id and the provider owning it.
///
/// The display name is not stored here; it is the registry key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    /// Remote identifier assigned by the cloud provider (e.g. `i-1234`).
    pub id: String,
    /// Provider name, compared case-insensitively.
    #[serde(rename = "cloud-provider")]
    pub cloud_provider: String,
}

impl Instance {
    #[must_use]
    pub fn new(id: impl Into<String>, cloud_provider: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            cloud_provider: cloud_provider.into(),
        }
    }

    /// Lower-cased provider name, the key used for provider resolution.
    #[must_use]
    pub fn provider_key(&self) -> String {
        self.cloud_provider.to_lowercase()
    }
}

/// An instance together with the display name it is tracked under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedInstance {
    pub name: String,
    #[serde(flatten)]
    pub instance: Instance,
}

impl NamedInstance {
    #[must_use]
    pub fn new(name: impl Into<String>, instance: Instance) -> Self {
        Self {
            name: name.into(),
            instance,
        }
    }
}

/// Remote instance lifecycle state.
///
/// Backends that do not support every state never emit the unsupported ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstanceState {
    Pending,
    Running,
    ShuttingDown,
    Stopping,
    Stopped,
    Terminated,
}

impl InstanceState {
    /// All states, in lifecycle order.
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Running,
        Self::ShuttingDown,
        Self::Stopping,
        Self::Stopped,
        Self::Terminated,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::ShuttingDown => "shutting-down",
            Self::Stopping => "stopping",
            Self::Stopped => "stopped",
            Self::Terminated => "terminated",
        }
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
}

impl fmt::Display for InstanceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown state string.
#[derive(Debug, thiserror::Error)]
#[error("unknown instance state '{0}'")]
pub struct ParseStateError(pub String);

impl FromStr for InstanceState {
    type Err = ParseStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseStateError(s.to_string()))
    }
}

/// Persisted shape of the registry: `{"instances": {name: {id, cloud-provider}}}`.
///
/// Key ordering is not guaranteed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    #[serde(default)]
    pub instances: HashMap<String, Instance>,
}
