//! In-memory reference implementation of the `CloudProvider` port.
//!
//! `MockCloud` keeps remote state in a map and follows the same
//! read-check-then-act contract as real backends. It is registered as `mock`
//! when enabled in the configuration and is used as a test double.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tracing::debug;

use crate::application::ports::CloudProvider;
use crate::domain::{InstanceState, ProviderError};

/// Default provider name of the mock backend.
pub const MOCK_PROVIDER: &str = "mock";

/// Cloud backend whose instances live in memory.
pub struct MockCloud {
    name: String,
    instances: Mutex<HashMap<String, InstanceState>>,
    status_calls: AtomicUsize,
    mutating_calls: AtomicUsize,
}

impl Default for MockCloud {
    fn default() -> Self {
        Self::named(MOCK_PROVIDER)
    }
}

impl MockCloud {
    /// An empty mock backend reporting `name`.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instances: Mutex::new(HashMap::new()),
            status_calls: AtomicUsize::new(0),
            mutating_calls: AtomicUsize::new(0),
        }
    }

    /// Seed a remote instance.
    #[must_use]
    pub fn with_instance(self, id: impl Into<String>, state: InstanceState) -> Self {
        self.lock().insert(id.into(), state);
        self
    }

    /// Seed every `(id, state)` pair.
    #[must_use]
    pub fn with_instances<I, S>(self, instances: I) -> Self
    where
        I: IntoIterator<Item = (S, InstanceState)>,
        S: Into<String>,
    {
        {
            let mut map = self.lock();
            for (id, state) in instances {
                map.insert(id.into(), state);
            }
        }
        self
    }

    /// Current state of `id`, without counting a status call.
    #[must_use]
    pub fn state_of(&self, id: &str) -> Option<InstanceState> {
        self.lock().get(id).copied()
    }

    /// Number of `get_status` queries served, including internal ones.
    #[must_use]
    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    /// Number of start/stop transitions actually applied.
    #[must_use]
    pub fn mutating_calls(&self) -> usize {
        self.mutating_calls.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, InstanceState>> {
        // A poisoned map is still consistent: every write is a single insert.
        self.instances
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn transition(&self, id: &str, state: InstanceState) {
        self.mutating_calls.fetch_add(1, Ordering::SeqCst);
        self.lock().insert(id.to_string(), state);
        debug!(provider = %self.name, id, %state, "mock transition");
    }
}

#[async_trait(?Send)]
impl CloudProvider for MockCloud {
    async fn start(&self, id: &str) -> Result<(), ProviderError> {
        if self.get_status(id).await?.is_running() {
            return Err(ProviderError::AlreadyRunning { id: id.to_string() });
        }
        self.transition(id, InstanceState::Running);
        Ok(())
    }

    async fn stop(&self, id: &str) -> Result<(), ProviderError> {
        if !self.get_status(id).await?.is_running() {
            return Err(ProviderError::NotRunning { id: id.to_string() });
        }
        self.transition(id, InstanceState::Stopped);
        Ok(())
    }

    async fn get_status(&self, id: &str) -> Result<InstanceState, ProviderError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        self.state_of(id)
            .ok_or_else(|| ProviderError::RemoteNotFound { id: id.to_string() })
    }

    fn name(&self) -> &str {
        &self.name
    }
}
