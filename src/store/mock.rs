//! In-memory collaborators for tests.
//!
//! Deterministic, no network, and every call is counted so tests can assert
//! how often configuration was loaded or the store was hit.

use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{Parameter, ParameterStore, ParameterType, StoreConnector};

/// A parameter store backed by a map. Unknown names fail like SSM's
/// `ParameterNotFound`.
#[derive(Default)]
pub struct MockParameterStore {
    parameters: HashMap<String, Parameter>,
    failure: Option<String>,
    calls: AtomicUsize,
}

impl MockParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter under `name`.
    pub fn with_parameter(mut self, name: &str, kind: ParameterType, value: &str) -> Self {
        self.parameters.insert(
            name.to_string(),
            Parameter {
                value: value.to_string(),
                kind,
            },
        );
        self
    }

    /// Makes every request fail with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Default::default()
        }
    }

    /// Number of `get_parameter` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ParameterStore for MockParameterStore {
    async fn get_parameter(&self, name: &str, with_decryption: bool) -> Result<Parameter> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.failure {
            return Err(anyhow!("{message}"));
        }
        let parameter = self
            .parameters
            .get(name)
            .cloned()
            .ok_or_else(|| anyhow!("ParameterNotFound: '{name}'"))?;
        if parameter.kind == ParameterType::SecureString && !with_decryption {
            return Err(anyhow!("SecureString '{name}' requested without decryption"));
        }
        Ok(parameter)
    }
}

/// Hands out one shared [`MockParameterStore`] and counts how often ambient
/// configuration was "loaded".
pub struct MockConnector {
    store: Arc<MockParameterStore>,
    failure: Option<String>,
    delay: Duration,
    connects: AtomicUsize,
}

impl MockConnector {
    pub fn new(store: Arc<MockParameterStore>) -> Self {
        Self {
            store,
            failure: None,
            delay: Duration::ZERO,
            connects: AtomicUsize::new(0),
        }
    }

    /// Makes every `connect` fail with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new(Arc::new(MockParameterStore::new()))
        }
    }

    /// Sleeps for `delay` before each `connect` completes.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of `connect` calls so far.
    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl StoreConnector for MockConnector {
    async fn connect(&self) -> Result<Arc<dyn ParameterStore>> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if let Some(message) = &self.failure {
            return Err(anyhow!("{message}"));
        }
        let store: Arc<dyn ParameterStore> = self.store.clone();
        Ok(store)
    }
}
