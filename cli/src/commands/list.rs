//! `instances list` — show tracked instances.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::instances;
use crate::commands::load_registry_unchecked;

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Only show instances of this provider (case-insensitive)
    #[arg(long)]
    pub cloud: Option<String>,
}

/// Run the list command. No provider is contacted.
///
/// # Errors
///
/// Returns an error if the registry cannot be loaded.
pub async fn run(app: &AppContext, args: &ListArgs) -> Result<()> {
    let registry = load_registry_unchecked(app).await?;
    let listed = instances::list_instances(&registry, args.cloud.as_deref());
    app.renderer().render_list(&listed)
}
