//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Provider errors ───────────────────────────────────────────────────────────

/// Errors raised by a cloud provider backend.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("instance '{id}' not found in the cloud provider")]
    RemoteNotFound { id: String },

    #[error("instance '{id}' is already running")]
    AlreadyRunning { id: String },

    #[error("instance '{id}' is not running")]
    NotRunning { id: String },

    /// Transport, auth or backend failure. Opaque to the registry.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ProviderError {
    /// Stable machine-readable code used by `--json` output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::RemoteNotFound { .. } => "REMOTE_NOT_FOUND",
            Self::AlreadyRunning { .. } => "ALREADY_RUNNING",
            Self::NotRunning { .. } => "NOT_RUNNING",
            Self::Other(_) => "PROVIDER_ERROR",
        }
    }
}

// ── Registry errors ───────────────────────────────────────────────────────────

/// Errors raised by registry operations and instance-to-provider resolution.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("instance '{name}' exists already")]
    NameExists { name: String },

    #[error("instance id '{id}' is already tracked as '{name}'")]
    IdAlreadyReferenced { id: String, name: String },

    #[error("no instance named '{name}'")]
    NotFound { name: String },

    #[error("unsupported cloud provider '{name}'")]
    UnsupportedProvider { name: String },

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl RegistryError {
    /// Stable machine-readable code used by `--json` output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NameExists { .. } => "NAME_EXISTS",
            Self::IdAlreadyReferenced { .. } => "ID_ALREADY_REFERENCED",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::UnsupportedProvider { .. } => "UNSUPPORTED_PROVIDER",
            Self::Provider(e) => e.code(),
        }
    }
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\nValid values: {valid}")]
    InvalidValue {
        key: String,
        value: String,
        valid: String,
    },
}

impl ConfigError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownKey { .. } => "UNKNOWN_SETTING",
            Self::InvalidValue { .. } => "INVALID_SETTING",
        }
    }
}

/// Find the most specific error code in an `anyhow` chain.
///
/// Returns `"UNKNOWN"` when no typed domain error is present.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<RegistryError>() {
            return e.code();
        }
        if let Some(e) = cause.downcast_ref::<ProviderError>() {
            return e.code();
        }
        if let Some(e) = cause.downcast_ref::<ConfigError>() {
            return e.code();
        }
    }
    "UNKNOWN"
}
