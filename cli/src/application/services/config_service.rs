//! Application service — configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::config::{InstancesConfig, apply_setting};

/// Load configuration.
pub fn load_config(store: &impl ConfigStore) -> Result<InstancesConfig> {
    store.load()
}

/// Save configuration.
pub fn save_config(store: &impl ConfigStore, config: &InstancesConfig) -> Result<()> {
    store.save(config)
}

/// Validate and persist a single setting, returning the updated configuration.
///
/// Nothing is written when validation fails.
///
/// # Errors
///
/// Returns an error if the key or value is invalid, or the store fails.
pub fn set_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<InstancesConfig> {
    let mut config = store.load()?;
    apply_setting(&mut config, key, value)?;
    store.save(&config)?;
    Ok(config)
}
