//! Registry use-cases: add, remove and list tracked instances.
//!
//! Imports only from `crate::domain` and `crate::application`.

use crate::application::providers::ProviderSet;
use crate::application::registry::Registry;
use crate::domain::{NamedInstance, RegistryError};

/// Already-parsed arguments of an add request.
#[derive(Debug, Clone, Default)]
pub struct AddRequest {
    /// Remote identifier to track.
    pub remote_id: String,
    /// Display name; the remote id is used when omitted.
    pub name: Option<String>,
    /// Provider name; the configured default is used when omitted.
    pub cloud: Option<String>,
}

/// Resolve the requested provider and add the instance to `registry`.
///
/// The provider is resolved before any registry check, so an unknown
/// provider fails without contacting any backend.
///
/// # Errors
///
/// `UnsupportedProvider`, then any error of [`Registry::add`].
pub async fn add_instance(
    registry: &mut Registry,
    providers: &ProviderSet,
    request: &AddRequest,
    default_cloud: &str,
) -> Result<NamedInstance, RegistryError> {
    let cloud = request.cloud.as_deref().unwrap_or(default_cloud);
    let provider = providers.get(cloud)?;
    let name = request.name.as_deref().unwrap_or(&request.remote_id);

    registry.add(&request.remote_id, name, provider).await?;
    Ok(NamedInstance::new(name, registry.get(name)?))
}

/// Stop tracking `name`, returning what was removed.
///
/// # Errors
///
/// `NotFound` if `name` is not tracked.
pub fn remove_instance(registry: &mut Registry, name: &str) -> Result<NamedInstance, RegistryError> {
    let instance = registry.remove(name)?;
    Ok(NamedInstance::new(name, instance))
}

/// Tracked instances sorted by name, optionally restricted to one provider.
///
/// The provider filter is case-insensitive and does not require the
/// provider to be configured.
#[must_use]
pub fn list_instances(registry: &Registry, cloud: Option<&str>) -> Vec<NamedInstance> {
    let wanted = cloud.map(str::to_lowercase);
    registry
        .entries()
        .into_iter()
        .filter(|(_, instance)| {
            wanted
                .as_deref()
                .is_none_or(|cloud| instance.provider_key() == cloud)
        })
        .map(|(name, instance)| NamedInstance::new(name, instance.clone()))
        .collect()
}
