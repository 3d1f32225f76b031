//! Application context — unified state passed to every command handler.
//!
//! `AppContext` is the composition root: it loads configuration once and
//! wires the registry store and the configured cloud providers.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::debug;

use crate::application::ports::{CloudProvider, ConfigStore as _};
use crate::application::providers::ProviderSet;
use crate::domain::InstancesConfig;
use crate::infra::aws::AwsCloud;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::YamlConfigStore;
use crate::infra::mock::MockCloud;
use crate::infra::registry_store::JsonRegistryStore;
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags passed from the top-level CLI.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Effective configuration, loaded once at startup.
    pub config: InstancesConfig,
    /// Configuration file store.
    pub config_store: YamlConfigStore,
    /// Registry snapshot store.
    pub registry_store: JsonRegistryStore,
    /// Cloud backends available for resolution.
    pub providers: ProviderSet,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be read or the home
    /// directory cannot be determined.
    pub fn new(flags: &OutputFlags) -> Result<Self> {
        let mode = if flags.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        let config_store = YamlConfigStore::new();
        let config = config_store.load()?;
        let registry_store = JsonRegistryStore::new(&config)?;
        let providers = build_providers(&config);
        debug!(
            registry = %registry_store.path().display(),
            providers = ?providers.names().collect::<Vec<_>>(),
            "application context ready"
        );

        Ok(Self {
            output: OutputContext::new(flags.no_color, flags.quiet),
            mode,
            config,
            config_store,
            registry_store,
            providers,
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Returns `true` when spinners should be drawn.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        !self.is_json() && self.output.show_progress()
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }
}

/// Build the provider set enabled by `config`.
#[must_use]
pub fn build_providers(config: &InstancesConfig) -> ProviderSet {
    let mut providers = ProviderSet::new();
    if config.aws.enabled {
        let runner = TokioCommandRunner::new(Duration::from_secs(config.aws.timeout_secs));
        let aws: Arc<dyn CloudProvider> = Arc::new(AwsCloud::from_config(runner, &config.aws));
        providers.insert(aws);
    }
    if config.mock.enabled {
        let mock = MockCloud::default().with_instances(
            config
                .mock
                .instances
                .iter()
                .map(|(id, state)| (id.clone(), *state)),
        );
        providers.insert(Arc::new(mock));
    }
    providers
}
