//! `instances stop` — request a running instance to stop.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::lifecycle;
use crate::commands::{InstanceArgs, load_registry, with_spinner};
use crate::output::Action;

/// Run the stop command.
///
/// # Errors
///
/// Returns an error if the name is not tracked, its provider is not
/// configured, the instance is not running, or the provider call fails.
pub async fn run(app: &AppContext, args: &InstanceArgs) -> Result<()> {
    let registry = load_registry(app).await?;
    let stopped = with_spinner(
        app,
        &format!("Stopping {}...", args.name),
        lifecycle::stop_instance(&registry, &app.providers, &args.name),
    )
    .await?;
    app.renderer().render_transition(&stopped, Action::Stop)
}
