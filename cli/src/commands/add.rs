//! `instances add` — start tracking a remote instance.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::instances::{self, AddRequest};
use crate::commands::{load_registry, save_registry, with_spinner};

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Cloud provider owning the instance [default: `defaults.cloud`]
    #[arg(long)]
    pub cloud: Option<String>,

    /// Display name [default: the remote id]
    #[arg(long)]
    pub name: Option<String>,

    /// Identifier assigned by the cloud provider (e.g. i-0abc123)
    pub remote_id: String,
}

/// Run the add command.
///
/// # Errors
///
/// Returns an error if the provider is not configured, the name or remote id
/// is already tracked, the remote instance does not exist, or the registry
/// cannot be saved.
pub async fn run(app: &AppContext, args: AddArgs) -> Result<()> {
    let mut registry = load_registry(app).await?;
    let request = AddRequest {
        remote_id: args.remote_id,
        name: args.name,
        cloud: args.cloud,
    };

    let added = with_spinner(
        app,
        &format!("Checking {}...", request.remote_id),
        instances::add_instance(
            &mut registry,
            &app.providers,
            &request,
            &app.config.defaults.cloud,
        ),
    )
    .await?;

    save_registry(app, &registry).await?;
    app.renderer().render_added(&added)
}
