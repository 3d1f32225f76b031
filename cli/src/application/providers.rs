//! Configured cloud providers and instance-to-provider resolution.
//!
//! The set is assembled once per process and treated as read-only afterwards.
//! Instances only hold provider names; resolution is a lookup, never ownership.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::application::ports::CloudProvider;
use crate::domain::{Instance, RegistryError};

/// Mapping from lower-cased provider name to provider.
#[derive(Default, Clone)]
pub struct ProviderSet {
    providers: BTreeMap<String, Arc<dyn CloudProvider>>,
}

impl ProviderSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `provider` under its lower-cased `name()`. Replaces any
    /// provider previously registered under the same name.
    pub fn insert(&mut self, provider: Arc<dyn CloudProvider>) {
        self.providers
            .insert(provider.name().to_lowercase(), provider);
    }

    /// Builder form of [`ProviderSet::insert`].
    #[must_use]
    pub fn with(mut self, provider: Arc<dyn CloudProvider>) -> Self {
        self.insert(provider);
        self
    }

    /// Look up a provider by name, case-insensitively.
    ///
    /// # Errors
    ///
    /// `UnsupportedProvider` if no provider is configured under `name`.
    pub fn get(&self, name: &str) -> Result<&dyn CloudProvider, RegistryError> {
        self.providers
            .get(&name.to_lowercase())
            .map(|provider| &**provider)
            .ok_or_else(|| RegistryError::UnsupportedProvider {
                name: name.to_string(),
            })
    }

    /// Configured provider names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

/// Resolve the provider that owns `instance`.
///
/// Unknown providers are a normal, recoverable error so that a registry
/// referencing unconfigured providers can still be inspected and edited.
///
/// # Errors
///
/// `UnsupportedProvider` carrying the instance's provider name.
pub fn resolve_provider<'a>(
    instance: &Instance,
    providers: &'a ProviderSet,
) -> Result<&'a dyn CloudProvider, RegistryError> {
    providers.get(&instance.cloud_provider)
}
