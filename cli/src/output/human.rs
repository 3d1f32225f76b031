//! Human-readable terminal renderer.

use std::borrow::Cow;
use std::path::Path;

use console::Alignment;
use owo_colors::OwoColorize as _;

use crate::application::services::lifecycle::InstanceStatus;
use crate::domain::{InstancesConfig, NamedInstance};
use crate::output::{Action, OutputContext};

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version information.
    pub fn render_version(&self, version: &str) {
        self.ctx.info(&format!("instances v{version}"));
    }

    pub fn render_added(&self, added: &NamedInstance) {
        self.ctx.success(&format!(
            "Tracking {} ({} on {})",
            added.name, added.instance.id, added.instance.cloud_provider
        ));
    }

    pub fn render_removed(&self, removed: &NamedInstance) {
        self.ctx.success(&format!(
            "No longer tracking {} ({})",
            removed.name, removed.instance.id
        ));
        self.ctx.info("The remote instance was left untouched.");
    }

    /// Render tracked instances as an aligned table.
    pub fn render_list(&self, instances: &[NamedInstance]) {
        if instances.is_empty() {
            if !self.ctx.quiet {
                println!("No instances tracked. Add one: instances add <INSTANCE_ID>");
            }
            return;
        }

        let name_w = column_width("NAME", instances.iter().map(|i| i.name.as_str()));
        let id_w = column_width("ID", instances.iter().map(|i| i.instance.id.as_str()));

        if !self.ctx.quiet {
            let header = format!("{}  {}  CLOUD", pad("NAME", name_w), pad("ID", id_w));
            println!("  {}", header.style(self.ctx.styles.bold));
        }
        for entry in instances {
            println!(
                "  {}  {}  {}",
                pad(&entry.name, name_w),
                pad(&entry.instance.id, id_w),
                entry.instance.cloud_provider
            );
        }
    }

    /// Render the remote state of one instance.
    ///
    /// In quiet mode only the bare state is printed, for use in scripts.
    pub fn render_status(&self, status: &InstanceStatus) {
        let state = status.state;
        if self.ctx.quiet {
            println!("{state}");
            return;
        }
        self.ctx.kv("Instance:", &status.instance.name);
        self.ctx.kv("ID:      ", &status.instance.instance.id);
        self.ctx.kv("Cloud:   ", &status.instance.instance.cloud_provider);
        self.ctx.kv(
            "State:   ",
            &state.style(self.ctx.styles.state(state)).to_string(),
        );
    }

    pub fn render_transition(&self, instance: &NamedInstance, action: Action) {
        self.ctx.success(&format!(
            "{} requested for {} ({})",
            capitalize(action.as_str()),
            instance.name,
            instance.instance.id
        ));
        if action == Action::Start {
            self.ctx
                .info(&format!("Check progress: instances status {}", instance.name));
        }
    }

    pub fn render_setting(&self, key: &str, value: &str) {
        self.ctx.success(&format!("Set {key} = {value}"));
    }

    /// Render the effective configuration.
    pub fn render_config(&self, config: &InstancesConfig, path: &Path, providers: &[&str]) {
        println!();
        self.ctx
            .header(&format!("Configuration ({})", path.display()));
        println!();
        let registry = config
            .registry_path
            .as_ref()
            .map_or_else(|| "(default)".to_string(), |p| p.display().to_string());
        println!("  {:<20} {registry}", "registry_path:");
        println!("  {:<20} {}", "defaults.cloud:", config.defaults.cloud);
        println!("  {:<20} {}", "aws.enabled:", config.aws.enabled);
        println!(
            "  {:<20} {}",
            "aws.region:",
            config.aws.region.as_deref().unwrap_or("(cli default)")
        );
        println!(
            "  {:<20} {}",
            "aws.profile:",
            config.aws.profile.as_deref().unwrap_or("(cli default)")
        );
        println!("  {:<20} {}", "aws.timeout_secs:", config.aws.timeout_secs);
        println!("  {:<20} {}", "mock.enabled:", config.mock.enabled);
        println!();
        let providers = if providers.is_empty() {
            "(none)".to_string()
        } else {
            providers.join(", ")
        };
        println!("  {:<20} {providers}", "Providers:".style(self.ctx.styles.bold));
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        for var in ["INSTANCES_CONFIG", "INSTANCES_DB", "INSTANCES_LOG", "NO_COLOR"] {
            println!(
                "    {:<18} {}",
                format!("{var}:"),
                std::env::var(var).unwrap_or_else(|_| "(not set)".to_string())
            );
        }
        println!();
    }
}

/// Widest terminal cell count among `title` and `values`.
fn column_width<'s>(title: &str, values: impl Iterator<Item = &'s str>) -> usize {
    values
        .map(console::measure_text_width)
        .fold(console::measure_text_width(title), usize::max)
}

/// Left-align `text` in `width` terminal cells.
fn pad(text: &str, width: usize) -> Cow<'_, str> {
    console::pad_str(text, width, Alignment::Left, None)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
