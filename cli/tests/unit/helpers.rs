//! Shared test helpers: a recording cloud provider and registry builders.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use instances_cli::application::ports::CloudProvider;
use instances_cli::application::providers::ProviderSet;
use instances_cli::domain::{InstanceState, ProviderError};

/// One call received by a [`RecordingCloud`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Start(String),
    Stop(String),
    Status(String),
}

/// In-memory provider that records every call it receives.
///
/// Unlike `MockCloud`, `start`/`stop` record the request before the state
/// check, so tests can tell whether a provider was contacted at all.
pub struct RecordingCloud {
    name: String,
    states: Mutex<HashMap<String, InstanceState>>,
    calls: Mutex<Vec<Call>>,
    fail_with: Option<String>,
}

impl RecordingCloud {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            states: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            fail_with: None,
        }
    }

    /// A provider whose every call fails with an opaque backend error.
    pub fn failing(name: &str, message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::new(name)
        }
    }

    pub fn with(self, id: &str, state: InstanceState) -> Self {
        self.states
            .lock()
            .expect("lock")
            .insert(id.to_string(), state);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("lock").clone()
    }

    pub fn state(&self, id: &str) -> Option<InstanceState> {
        self.states.lock().expect("lock").get(id).copied()
    }

    fn record(&self, call: Call) -> Result<(), ProviderError> {
        self.calls.lock().expect("lock").push(call);
        match &self.fail_with {
            Some(message) => Err(anyhow::anyhow!("{message}").into()),
            None => Ok(()),
        }
    }

    fn current(&self, id: &str) -> Result<InstanceState, ProviderError> {
        self.state(id)
            .ok_or_else(|| ProviderError::RemoteNotFound { id: id.to_string() })
    }

    fn set(&self, id: &str, state: InstanceState) {
        self.states
            .lock()
            .expect("lock")
            .insert(id.to_string(), state);
    }
}

#[async_trait(?Send)]
impl CloudProvider for RecordingCloud {
    async fn start(&self, id: &str) -> Result<(), ProviderError> {
        self.record(Call::Start(id.to_string()))?;
        if self.current(id)?.is_running() {
            return Err(ProviderError::AlreadyRunning { id: id.to_string() });
        }
        self.set(id, InstanceState::Pending);
        Ok(())
    }

    async fn stop(&self, id: &str) -> Result<(), ProviderError> {
        self.record(Call::Stop(id.to_string()))?;
        if !self.current(id)?.is_running() {
            return Err(ProviderError::NotRunning { id: id.to_string() });
        }
        self.set(id, InstanceState::Stopping);
        Ok(())
    }

    async fn get_status(&self, id: &str) -> Result<InstanceState, ProviderError> {
        self.record(Call::Status(id.to_string()))?;
        self.current(id)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Build a provider set from shared recording providers.
pub fn provider_set(providers: &[&Arc<RecordingCloud>]) -> ProviderSet {
    let mut set = ProviderSet::new();
    for provider in providers {
        set.insert(Arc::clone(*provider) as Arc<dyn CloudProvider>);
    }
    set
}
