//! `instances config` — show and set configuration values.

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::application::services::config_service;

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Set configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be read, the key or value is
/// invalid, or the file cannot be written.
pub fn run(app: &AppContext, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => show_config(app),
        ConfigCommand::Set { key, value } => set_config(app, &key, &value),
    }
}

fn show_config(app: &AppContext) -> Result<()> {
    let path = app.config_store.path()?;
    let providers: Vec<&str> = app.providers.names().collect();
    app.renderer().render_config(&app.config, &path, &providers)
}

fn set_config(app: &AppContext, key: &str, value: &str) -> Result<()> {
    config_service::set_value(&app.config_store, key, value)?;
    app.renderer().render_setting(key, value)
}
