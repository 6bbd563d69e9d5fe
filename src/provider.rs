//! Contract between a configuration host and the providers it registers.

use std::sync::Arc;

use crate::context::CallContext;
use crate::error::ResolveError;
use crate::value::ResolvedValue;

/// Notification that a previously resolved value changed upstream.
#[derive(Debug, Clone, Default)]
pub struct ChangeEvent {
    /// Set when the provider lost track of the value instead of seeing a change.
    pub error: Option<String>,
}

/// Callback a host passes to [`ConfigProvider::retrieve`] to hear about changes.
pub type WatcherFunc = Arc<dyn Fn(ChangeEvent) + Send + Sync>;

/// A source of configuration values for one URI scheme.
///
/// The host looks providers up by [`scheme`](ConfigProvider::scheme), calls
/// [`retrieve`](ConfigProvider::retrieve) for every matching source URI while
/// assembling its configuration, and owns merging the results.
#[async_trait::async_trait]
pub trait ConfigProvider: Send + Sync {
    fn scheme(&self) -> &'static str;

    async fn retrieve(
        &self,
        uri: &str,
        ctx: &CallContext,
        watcher: Option<WatcherFunc>,
    ) -> Result<ResolvedValue, ResolveError>;

    async fn shutdown(&self, ctx: &CallContext) -> Result<(), ResolveError>;
}
