//! Command implementations

pub mod add;
pub mod config;
pub mod list;
pub mod rm;
pub mod start;
pub mod status;
pub mod stop;
pub mod version;

use std::future::Future;

use anyhow::{Context, Result};
use clap::Args;
use tracing::warn;

use crate::app::AppContext;
use crate::application::ports::RegistryStore;
use crate::application::registry::Registry;
use crate::output::progress;

/// Arguments shared by commands that address one tracked instance.
#[derive(Args)]
pub struct InstanceArgs {
    /// Display name of the tracked instance
    pub name: String,
}

/// Load the persisted registry.
///
/// # Errors
///
/// Returns an error if the registry file cannot be read or violates the
/// one-name-per-remote-id rule.
pub async fn load_registry(app: &AppContext) -> Result<Registry> {
    let snapshot = app.registry_store.load_async().await?;
    let registry = Registry::from_snapshot_unchecked(snapshot);
    registry.validate().with_context(|| {
        format!(
            "invalid registry file {}",
            app.registry_store.path().display()
        )
    })?;
    Ok(registry)
}

/// Load the persisted registry, tolerating entries that share a remote id.
///
/// Used by `list` and `rm` so a damaged file can be inspected and repaired.
/// The violation is logged, not rendered, to keep stdout clean.
///
/// # Errors
///
/// Returns an error if the registry file cannot be read.
pub async fn load_registry_unchecked(app: &AppContext) -> Result<Registry> {
    let snapshot = app.registry_store.load_async().await?;
    let registry = Registry::from_snapshot_unchecked(snapshot);
    if let Err(e) = registry.validate() {
        warn!(
            path = %app.registry_store.path().display(),
            error = %e,
            "registry file has entries sharing a remote id"
        );
    }
    Ok(registry)
}

/// Persist the registry, replacing the stored snapshot.
///
/// # Errors
///
/// Returns an error if the registry file cannot be written.
pub async fn save_registry(app: &AppContext, registry: &Registry) -> Result<()> {
    app.registry_store.save_async(&registry.snapshot()).await
}

/// Await `fut` behind a spinner when progress output is enabled.
pub async fn with_spinner<T>(app: &AppContext, msg: &str, fut: impl Future<Output = T>) -> T {
    if !app.show_progress() {
        return fut.await;
    }
    let pb = progress::spinner(msg);
    let out = fut.await;
    progress::finish_clear(&pb);
    out
}
