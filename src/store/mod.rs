//! Parameter store collaborators.
//!
//! [`ParameterStore`] is the async trait for fetching one parameter.
//! [`StoreConnector`] loads ambient configuration and builds a [`ParameterStore`].
//! [`SsmParameterStore`] and [`AmbientSsmConnector`] implement them over AWS SSM.
//! `mock` (feature `mock`) holds in-memory doubles with call counters.

#[cfg(any(test, feature = "mock"))]
pub mod mock;
mod ssm;

pub use ssm::{AmbientSsmConnector, SsmParameterStore};

use anyhow::Result;
use std::sync::Arc;

/// Declared type of a stored parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterType {
    String,
    StringList,
    SecureString,
}

/// A fetched parameter. `value` is already decrypted for `SecureString`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub value: String,
    pub kind: ParameterType,
}

/// Fetches a single named parameter from a remote store.
#[async_trait::async_trait]
pub trait ParameterStore: Send + Sync {
    async fn get_parameter(&self, name: &str, with_decryption: bool) -> Result<Parameter>;
}

/// Loads whatever credentials/region/endpoint the environment provides and
/// builds an authenticated [`ParameterStore`] from them.
#[async_trait::async_trait]
pub trait StoreConnector: Send + Sync {
    async fn connect(&self) -> Result<Arc<dyn ParameterStore>>;
}

#[async_trait::async_trait]
impl<C: StoreConnector + ?Sized> StoreConnector for Arc<C> {
    async fn connect(&self) -> Result<Arc<dyn ParameterStore>> {
        (**self).connect().await
    }
}
