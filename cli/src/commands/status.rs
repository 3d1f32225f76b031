//! `instances status` — query the remote state of a tracked instance.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::lifecycle;
use crate::commands::{InstanceArgs, load_registry, with_spinner};

/// Run the status command.
///
/// # Errors
///
/// Returns an error if the name is not tracked, its provider is not
/// configured, or the provider query fails.
pub async fn run(app: &AppContext, args: &InstanceArgs) -> Result<()> {
    let registry = load_registry(app).await?;
    let status = with_spinner(
        app,
        &format!("Querying {}...", args.name),
        lifecycle::instance_status(&registry, &app.providers, &args.name),
    )
    .await?;
    app.renderer().render_status(&status)
}
