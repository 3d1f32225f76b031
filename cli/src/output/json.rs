//! JSON output helpers.
//!
//! Every `--json` code path prints one pretty-printed document on stdout.
//! Failures use the error object produced by [`format_error`].

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::application::services::lifecycle::InstanceStatus;
use crate::domain::{InstancesConfig, NamedInstance};
use crate::output::Action;

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Renders domain types as JSON documents on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_added(&self, added: &NamedInstance) -> Result<()> {
        print_json(added)
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_removed(&self, removed: &NamedInstance) -> Result<()> {
        print_json(removed)
    }

    /// Render `{"instances": [...]}`, preserving the given order.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_list(&self, instances: &[NamedInstance]) -> Result<()> {
        print_json(&serde_json::json!({ "instances": instances }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_status(&self, status: &InstanceStatus) -> Result<()> {
        print_json(status)
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_transition(&self, instance: &NamedInstance, action: Action) -> Result<()> {
        let mut value = serde_json::to_value(instance).context("JSON serialization failed")?;
        if let Some(obj) = value.as_object_mut() {
            obj.insert("requested".to_string(), action.as_str().into());
        }
        print_json(&value)
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config(
        &self,
        config: &InstancesConfig,
        path: &Path,
        providers: &[&str],
    ) -> Result<()> {
        print_json(&serde_json::json!({
            "path": path,
            "config": config,
            "providers": providers,
        }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_setting(&self, key: &str, value: &str) -> Result<()> {
        print_json(&serde_json::json!({ "key": key, "value": value }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(&self, version: &str) -> Result<()> {
        print_json(&serde_json::json!({ "version": version }))
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("JSON serialization failed")?;
    println!("{out}");
    Ok(())
}
