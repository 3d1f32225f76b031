//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::PathBuf;
use std::process::Output;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::{InstanceState, InstancesConfig, ProviderError, RegistrySnapshot};

// ── Cloud Provider Port ───────────────────────────────────────────────────────

/// Lifecycle control over remote compute instances of one cloud backend.
///
/// `start` and `stop` are read-check-then-act: implementations query the
/// status first and refuse redundant transitions instead of issuing the
/// remote call.
#[async_trait(?Send)]
pub trait CloudProvider: Send + Sync {
    /// Request the instance to transition toward running.
    ///
    /// # Errors
    ///
    /// `AlreadyRunning` if the instance is running, `RemoteNotFound` if the
    /// backend does not know `id`, or an opaque backend error.
    async fn start(&self, id: &str) -> Result<(), ProviderError>;

    /// Request a running instance to stop.
    ///
    /// # Errors
    ///
    /// `NotRunning` if the instance is not running, `RemoteNotFound` if the
    /// backend does not know `id`, or an opaque backend error.
    async fn stop(&self, id: &str) -> Result<(), ProviderError>;

    /// Query the current remote state.
    ///
    /// # Errors
    ///
    /// `RemoteNotFound` if the backend has no record of `id`.
    async fn get_status(&self, id: &str) -> Result<InstanceState, ProviderError>;

    /// Stable identifier of this backend (`"aws"`, `"mock"`), the resolution key.
    fn name(&self) -> &str;
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
}

// ── Registry and Config Stores ────────────────────────────────────────────────

/// Abstracts registry snapshot persistence (load/save).
#[allow(async_fn_in_trait)]
pub trait RegistryStore {
    /// Load the persisted snapshot. A store with no data yields an empty snapshot.
    async fn load_async(&self) -> Result<RegistrySnapshot>;
    /// Persist the given snapshot, replacing what was stored.
    async fn save_async(&self, snapshot: &RegistrySnapshot) -> Result<()>;
}

/// Abstracts configuration persistence.
pub trait ConfigStore {
    /// Load configuration, falling back to defaults when none is stored.
    fn load(&self) -> Result<InstancesConfig>;
    /// Persist configuration.
    fn save(&self, config: &InstancesConfig) -> Result<()>;
    /// Location of the configuration file.
    fn path(&self) -> Result<PathBuf>;
}
