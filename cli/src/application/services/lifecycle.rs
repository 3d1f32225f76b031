//! Lifecycle orchestration: start, stop and status of a tracked instance.
//!
//! Every operation follows `name → Registry::get → resolve_provider →
//! CloudProvider`. Any failure short-circuits unchanged; there is no retry,
//! no fallback provider and no cached state.

use serde::Serialize;
use tracing::debug;

use crate::application::ports::CloudProvider;
use crate::application::providers::{ProviderSet, resolve_provider};
use crate::application::registry::Registry;
use crate::domain::{InstanceState, NamedInstance, RegistryError};

/// Remote state of a tracked instance, fetched fresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstanceStatus {
    #[serde(flatten)]
    pub instance: NamedInstance,
    pub state: InstanceState,
}

fn lookup<'a>(
    registry: &Registry,
    providers: &'a ProviderSet,
    name: &str,
) -> Result<(NamedInstance, &'a dyn CloudProvider), RegistryError> {
    let instance = registry.get(name)?;
    let provider = resolve_provider(&instance, providers)?;
    debug!(instance = name, id = %instance.id, provider = provider.name(), "resolved");
    Ok((NamedInstance::new(name, instance), provider))
}

/// Start the instance tracked under `name`.
///
/// # Errors
///
/// `NotFound`, `UnsupportedProvider`, or the provider's error
/// (`AlreadyRunning`, `RemoteNotFound`, opaque backend failures).
pub async fn start_instance(
    registry: &Registry,
    providers: &ProviderSet,
    name: &str,
) -> Result<NamedInstance, RegistryError> {
    let (named, provider) = lookup(registry, providers, name)?;
    provider.start(&named.instance.id).await?;
    Ok(named)
}

/// Stop the instance tracked under `name`.
///
/// # Errors
///
/// `NotFound`, `UnsupportedProvider`, or the provider's error
/// (`NotRunning`, `RemoteNotFound`, opaque backend failures).
pub async fn stop_instance(
    registry: &Registry,
    providers: &ProviderSet,
    name: &str,
) -> Result<NamedInstance, RegistryError> {
    let (named, provider) = lookup(registry, providers, name)?;
    provider.stop(&named.instance.id).await?;
    Ok(named)
}

/// Query the remote state of the instance tracked under `name`.
///
/// # Errors
///
/// `NotFound`, `UnsupportedProvider`, or the provider's error.
pub async fn instance_status(
    registry: &Registry,
    providers: &ProviderSet,
    name: &str,
) -> Result<InstanceStatus, RegistryError> {
    let (named, provider) = lookup(registry, providers, name)?;
    let state = provider.get_status(&named.instance.id).await?;
    Ok(InstanceStatus {
        instance: named,
        state,
    })
}
