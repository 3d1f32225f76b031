//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod error;
pub mod instance;

pub use config::{InstancesConfig, apply_setting, validate_config_key, validate_config_value};
pub use error::{ConfigError, ProviderError, RegistryError, error_code};
pub use instance::{Instance, InstanceState, NamedInstance, RegistrySnapshot};
