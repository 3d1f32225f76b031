//! The instance registry: display name → `Instance`.
//!
//! Invariants held between public operations:
//! - display names are unique (map key),
//! - remote ids are unique across entries,
//! - a failed `add` leaves the entry set unchanged.
//!
//! Provider names are not checked here; they are resolved lazily at use time
//! because the configured provider set may differ between runs.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::application::ports::CloudProvider;
use crate::domain::{Instance, RegistryError, RegistrySnapshot};

/// In-memory registry, constructed from and serialized back to a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    instances: HashMap<String, Instance>,
}

impl Registry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a persisted snapshot.
    ///
    /// # Errors
    ///
    /// `IdAlreadyReferenced` if two entries of the snapshot share a remote id.
    pub fn from_snapshot(snapshot: RegistrySnapshot) -> Result<Self, RegistryError> {
        let registry = Self::from_snapshot_unchecked(snapshot);
        registry.validate()?;
        Ok(registry)
    }

    /// Build a registry from a snapshot without checking remote-id
    /// uniqueness, so a damaged file can still be listed and repaired.
    #[must_use]
    pub fn from_snapshot_unchecked(snapshot: RegistrySnapshot) -> Self {
        Self {
            instances: snapshot.instances,
        }
    }

    /// Check that no two entries share a remote id.
    ///
    /// # Errors
    ///
    /// `IdAlreadyReferenced` naming the alphabetically first entry of the
    /// first duplicated id.
    pub fn validate(&self) -> Result<(), RegistryError> {
        let mut names: Vec<&String> = self.instances.keys().collect();
        names.sort();
        let mut seen: HashMap<&str, &str> = HashMap::new();
        for name in names {
            let id = self.instances[name].id.as_str();
            if let Some(first) = seen.insert(id, name) {
                return Err(RegistryError::IdAlreadyReferenced {
                    id: id.to_string(),
                    name: first.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Current state in the persisted shape.
    #[must_use]
    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            instances: self.instances.clone(),
        }
    }

    /// Track `remote_id` under `name`, owned by `provider`.
    ///
    /// Checks run in order and the first failure wins; nothing is written
    /// unless all pass. The status fetched from the provider is discarded,
    /// only its success matters.
    ///
    /// # Errors
    ///
    /// `NameExists`, `IdAlreadyReferenced`, or the provider's own error
    /// (typically `RemoteNotFound`) passed through unchanged.
    pub async fn add(
        &mut self,
        remote_id: &str,
        name: &str,
        provider: &dyn CloudProvider,
    ) -> Result<(), RegistryError> {
        if self.instances.contains_key(name) {
            return Err(RegistryError::NameExists {
                name: name.to_string(),
            });
        }
        if let Some(existing) = self.name_of(remote_id) {
            return Err(RegistryError::IdAlreadyReferenced {
                id: remote_id.to_string(),
                name: existing.to_string(),
            });
        }

        debug!(provider = provider.name(), id = remote_id, "checking remote instance");
        provider.get_status(remote_id).await?;

        self.instances
            .insert(name.to_string(), Instance::new(remote_id, provider.name()));
        info!(instance = name, id = remote_id, provider = provider.name(), "instance added");
        Ok(())
    }

    /// A copy of the instance tracked under `name`.
    ///
    /// # Errors
    ///
    /// `NotFound` if `name` is not tracked.
    pub fn get(&self, name: &str) -> Result<Instance, RegistryError> {
        self.instances
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound {
                name: name.to_string(),
            })
    }

    /// Stop tracking `name`. The remote instance is not touched.
    ///
    /// # Errors
    ///
    /// `NotFound` if `name` is not tracked.
    pub fn remove(&mut self, name: &str) -> Result<Instance, RegistryError> {
        let removed = self
            .instances
            .remove(name)
            .ok_or_else(|| RegistryError::NotFound {
                name: name.to_string(),
            })?;
        info!(instance = name, id = %removed.id, "instance removed");
        Ok(removed)
    }

    /// Display name under which `remote_id` is tracked, if any.
    #[must_use]
    pub fn name_of(&self, remote_id: &str) -> Option<&str> {
        self.instances
            .iter()
            .find(|(_, instance)| instance.id == remote_id)
            .map(|(name, _)| name.as_str())
    }

    /// All entries, sorted by display name.
    #[must_use]
    pub fn entries(&self) -> Vec<(&str, &Instance)> {
        let mut entries: Vec<_> = self
            .instances
            .iter()
            .map(|(name, instance)| (name.as_str(), instance))
            .collect();
        entries.sort_by_key(|(name, _)| *name);
        entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
