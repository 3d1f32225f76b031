//! Infrastructure implementation of the `RegistryStore` port.
//!
//! `JsonRegistryStore` provides async load/save using `tokio::task::spawn_blocking`
//! with atomic write (temp file + rename) to prevent registry corruption.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::application::ports::RegistryStore;
use crate::domain::{InstancesConfig, RegistrySnapshot};

/// Environment variable overriding the registry file location.
pub const REGISTRY_ENV: &str = "INSTANCES_DB";

/// Registry file name under the home directory.
const REGISTRY_FILE: &str = ".instances.db.json";

/// Registry file manager — implements `RegistryStore` for the infra layer.
pub struct JsonRegistryStore {
    path: PathBuf,
}

impl JsonRegistryStore {
    /// Create a store at the location selected by `INSTANCES_DB`, then
    /// `registry_path` from `config`, then `~/.instances.db.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new(config: &InstancesConfig) -> Result<Self> {
        if let Ok(val) = std::env::var(REGISTRY_ENV) {
            return Ok(Self::with_path(PathBuf::from(val)));
        }
        if let Some(path) = &config.registry_path {
            return Ok(Self::with_path(path.clone()));
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(Self::with_path(home.join(REGISTRY_FILE)))
    }

    /// Create a store with an explicit path (used in tests).
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_sync(path: &Path) -> Result<RegistrySnapshot> {
        if !path.exists() {
            debug!(path = %path.display(), "no registry file, starting empty");
            return Ok(RegistrySnapshot::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading registry {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("parsing registry {}", path.display()))
    }

    fn save_sync(path: &Path, snapshot: &RegistrySnapshot) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(snapshot).context("serializing registry")?;

        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, &content)
            .with_context(|| format!("writing temp file {}", temp_path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&temp_path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("setting permissions on {}", temp_path.display()))?;
        }

        std::fs::rename(&temp_path, path)
            .with_context(|| format!("finalizing registry {}", path.display()))?;
        debug!(path = %path.display(), entries = snapshot.instances.len(), "registry saved");
        Ok(())
    }
}

impl RegistryStore for JsonRegistryStore {
    async fn load_async(&self) -> Result<RegistrySnapshot> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || Self::load_sync(&path))
            .await
            .context("registry load task panicked")?
    }

    async fn save_async(&self, snapshot: &RegistrySnapshot) -> Result<()> {
        let path = self.path.clone();
        let snapshot = snapshot.clone();
        tokio::task::spawn_blocking(move || Self::save_sync(&path, &snapshot))
            .await
            .context("registry save task panicked")?
    }
}
