//! `instances rm` — stop tracking an instance. The remote side is untouched.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::instances;
use crate::commands::{InstanceArgs, load_registry_unchecked, save_registry};

/// Run the rm command.
///
/// # Errors
///
/// Returns an error if the name is not tracked or the registry cannot be saved.
pub async fn run(app: &AppContext, args: &InstanceArgs) -> Result<()> {
    let mut registry = load_registry_unchecked(app).await?;
    let removed = instances::remove_instance(&mut registry, &args.name)?;
    save_registry(app, &registry).await?;
    app.renderer().render_removed(&removed)
}
