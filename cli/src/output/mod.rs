//! Output formatting module

pub mod human;
pub mod json;
pub mod progress;
pub mod styles;

use std::path::Path;

use anyhow::Result;
use console::Term;
use owo_colors::OwoColorize as _;

pub use human::HumanRenderer;
pub use json::JsonRenderer;
pub use styles::Styles;

use crate::application::services::lifecycle::InstanceStatus;
use crate::domain::{InstancesConfig, NamedInstance};

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let use_colors = !no_color && is_tty && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    /// Check if progress indicators should be shown.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    /// Print a success message prefixed with `✓`. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "✓".style(self.styles.success));
        }
    }

    /// Print an error message prefixed with `✗` to stderr. Never suppressed.
    pub fn error(&self, msg: &str) {
        eprintln!("  {} {msg}", "✗".style(self.styles.error));
    }

    /// Print an info message prefixed with `ℹ`. Suppressed when `quiet`.
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "ℹ".style(self.styles.info));
        }
    }

    /// Print a section header. Suppressed when `quiet`.
    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("  {}", msg.style(self.styles.header));
        }
    }

    /// Print a key-value pair with the key dimmed. Suppressed when `quiet`.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {}  {value}", key.style(self.styles.dim));
        }
    }
}

/// Output renderer selected from the `--json` flag.
pub enum Renderer<'a> {
    Human(HumanRenderer<'a>),
    Json(JsonRenderer),
}

impl Renderer<'_> {
    /// Render a newly tracked instance.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_added(&self, added: &NamedInstance) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_added(added);
                Ok(())
            }
            Self::Json(r) => r.render_added(added),
        }
    }

    /// Render an instance that is no longer tracked.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_removed(&self, removed: &NamedInstance) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_removed(removed);
                Ok(())
            }
            Self::Json(r) => r.render_removed(removed),
        }
    }

    /// Render the tracked instances.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_list(&self, instances: &[NamedInstance]) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_list(instances);
                Ok(())
            }
            Self::Json(r) => r.render_list(instances),
        }
    }

    /// Render the remote state of an instance.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_status(&self, status: &InstanceStatus) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_status(status);
                Ok(())
            }
            Self::Json(r) => r.render_status(status),
        }
    }

    /// Render an accepted start or stop request.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_transition(&self, instance: &NamedInstance, action: Action) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_transition(instance, action);
                Ok(())
            }
            Self::Json(r) => r.render_transition(instance, action),
        }
    }

    /// Render the effective configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config(
        &self,
        config: &InstancesConfig,
        path: &Path,
        providers: &[&str],
    ) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_config(config, path, providers);
                Ok(())
            }
            Self::Json(r) => r.render_config(config, path, providers),
        }
    }

    /// Render a configuration value that was just written.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_setting(&self, key: &str, value: &str) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_setting(key, value);
                Ok(())
            }
            Self::Json(r) => r.render_setting(key, value),
        }
    }

    /// Render the CLI version.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(&self, version: &str) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_version(version);
                Ok(())
            }
            Self::Json(r) => r.render_version(version),
        }
    }
}

/// Lifecycle request kind, used in output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Stop,
}

impl Action {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
        }
    }
}
