//! The `awsssm` configuration provider.
//!
//! A [`Resolver`] starts without a client. The first [`Resolver::resolve`]
//! loads the ambient AWS configuration and builds the SSM client; every later
//! call on the same instance reuses it. Initialization is bounded by the
//! caller's deadline only, while the GetParameter request itself honours
//! both the deadline and the caller's cancellation.

use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::config::ResolverConfig;
use crate::context::CallContext;
use crate::error::ResolveError;
use crate::provider::{ConfigProvider, WatcherFunc};
use crate::store::{AmbientSsmConnector, ParameterStore, StoreConnector};
use crate::uri::{ParameterUri, SCHEME};
use crate::value::ResolvedValue;

pub struct Resolver {
    connector: Box<dyn StoreConnector>,
    client: OnceCell<Arc<dyn ParameterStore>>,
}

impl Resolver {
    /// Resolver backed by AWS SSM and the ambient AWS configuration.
    pub fn new(config: ResolverConfig) -> Self {
        Self::with_connector(AmbientSsmConnector::new(config))
    }

    /// Resolver that obtains its store from `connector`.
    pub fn with_connector(connector: impl StoreConnector + 'static) -> Self {
        Self {
            connector: Box::new(connector),
            client: OnceCell::new(),
        }
    }

    /// Whether a store client has been created yet.
    pub fn is_initialized(&self) -> bool {
        self.client.initialized()
    }

    /// Fetches the parameter named by `uri`.
    ///
    /// `watcher` is accepted for host compatibility and never invoked.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::InvalidUri`] / [`ResolveError::UnsupportedScheme`]
    ///   before any network activity.
    /// - [`ResolveError::ClientInit`] if the client could not be created; the
    ///   resolver stays uninitialized and the next call tries again.
    /// - [`ResolveError::Fetch`] for any failure of the request itself,
    ///   including cancellation or deadline expiry. A cached client is kept.
    #[tracing::instrument(skip_all, fields(uri = %uri))]
    pub async fn resolve(
        &self,
        uri: &str,
        ctx: &CallContext,
        _watcher: Option<WatcherFunc>,
    ) -> Result<ResolvedValue, ResolveError> {
        let parameter_uri = ParameterUri::parse(uri)?;
        let name = parameter_uri.name();

        let client = self.client(ctx).await?;

        let parameter = ctx
            .run(client.get_parameter(name, true))
            .await
            .map_err(|source| {
                warn!(parameter = %name, error = %format!("{source:#}"), "GetParameter failed");
                ResolveError::Fetch {
                    name: name.to_string(),
                    source,
                }
            })?;

        debug!(parameter = %name, kind = ?parameter.kind, "Parameter fetched");
        Ok(ResolvedValue::from_parameter(parameter))
    }

    /// Nothing to release; always succeeds, also before any `resolve`.
    pub async fn shutdown(&self, _ctx: &CallContext) -> Result<(), ResolveError> {
        debug!(initialized = self.is_initialized(), "Resolver shut down");
        Ok(())
    }

    async fn client(&self, ctx: &CallContext) -> Result<&Arc<dyn ParameterStore>, ResolveError> {
        self.client
            .get_or_try_init(|| async {
                // Keep the caller's deadline but not its cancellation.
                let init_ctx = ctx.detached();
                debug!(deadline = ?init_ctx.deadline(), "Creating parameter store client");
                init_ctx.run(self.connector.connect()).await.map_err(|e| {
                    warn!(error = %format!("{e:#}"), "Parameter store client initialization failed");
                    ResolveError::ClientInit(e)
                })
            })
            .await
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}

#[async_trait::async_trait]
impl ConfigProvider for Resolver {
    fn scheme(&self) -> &'static str {
        SCHEME
    }

    async fn retrieve(
        &self,
        uri: &str,
        ctx: &CallContext,
        watcher: Option<WatcherFunc>,
    ) -> Result<ResolvedValue, ResolveError> {
        self.resolve(uri, ctx, watcher).await
    }

    async fn shutdown(&self, ctx: &CallContext) -> Result<(), ResolveError> {
        Resolver::shutdown(self, ctx).await
    }
}
