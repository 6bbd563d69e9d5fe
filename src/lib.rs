//! Resolves `awsssm://<parameter-name>` configuration references against AWS
//! SSM Parameter Store.
//!
//! [`Resolver`] is registered with a configuration host under the `awsssm`
//! scheme (see [`ConfigProvider`]). `String` and `SecureString` parameters
//! come back as [`ResolvedValue::Scalar`], `StringList` parameters as
//! [`ResolvedValue::List`].

pub mod config;
pub mod context;
pub mod error;
pub mod provider;
pub mod resolver;
pub mod store;
pub mod uri;
pub mod value;

pub use config::ResolverConfig;
pub use context::{CallContext, ContextError};
pub use error::{ResolveError, UriError};
pub use provider::{ChangeEvent, ConfigProvider, WatcherFunc};
pub use resolver::Resolver;
pub use uri::SCHEME;
pub use value::ResolvedValue;
