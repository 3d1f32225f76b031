//! Application layer — port trait definitions and use-case orchestration.
//!
//! This module depends only on `crate::domain` — never on `crate::infra`,
//! `crate::commands`, or `crate::output`.

pub mod ports;
pub mod providers;
pub mod registry;
pub mod services;

pub use ports::{CloudProvider, CommandRunner, ConfigStore, RegistryStore};
pub use providers::{ProviderSet, resolve_provider};
pub use registry::Registry;
