//! `instances start` — request a tracked instance to start.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::lifecycle;
use crate::commands::{InstanceArgs, load_registry, with_spinner};
use crate::output::Action;

/// Run the start command.
///
/// # Errors
///
/// Returns an error if the name is not tracked, its provider is not
/// configured, the instance is already running, or the provider call fails.
pub async fn run(app: &AppContext, args: &InstanceArgs) -> Result<()> {
    let registry = load_registry(app).await?;
    let started = with_spinner(
        app,
        &format!("Starting {}...", args.name),
        lifecycle::start_instance(&registry, &app.providers, &args.name),
    )
    .await?;
    app.renderer().render_transition(&started, Action::Start)
}
