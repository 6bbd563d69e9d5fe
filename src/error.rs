//! Error kinds surfaced by [`Resolver`](crate::resolver::Resolver).

use thiserror::Error;

/// Why a URI was rejected before its scheme was looked at.
#[derive(Error, Debug)]
pub enum UriError {
    #[error(transparent)]
    Parse(#[from] url::ParseError),

    /// Surrounding spaces or embedded control characters, which `Url` would
    /// silently strip.
    #[error("URI contains surrounding whitespace or control characters")]
    StrayCharacters,
}

/// Every failure aborts the resolution call it happened in. There is no
/// fallback value and nothing is retried.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The URI could not be parsed at all.
    #[error("invalid URI '{uri}'")]
    InvalidUri {
        uri: String,
        #[source]
        source: UriError,
    },

    /// The URI parsed but names a scheme this resolver does not serve.
    #[error("unsupported scheme '{scheme}'")]
    UnsupportedScheme { scheme: String },

    /// Loading the ambient AWS configuration or building the SSM client failed.
    #[error("failed to initialize parameter store client")]
    ClientInit(#[source] anyhow::Error),

    /// The GetParameter request failed, for whatever reason.
    #[error("failed to fetch parameter '{name}'")]
    Fetch {
        name: String,
        #[source]
        source: anyhow::Error,
    },
}

impl ResolveError {
    /// Short, stable name of the stage that failed. Used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ResolveError::InvalidUri { .. } => "invalid_uri",
            ResolveError::UnsupportedScheme { .. } => "unsupported_scheme",
            ResolveError::ClientInit(_) => "client_init",
            ResolveError::Fetch { .. } => "fetch",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_message_names_parameter_source_holds_cause() {
        let err = ResolveError::Fetch {
            name: "/app/db/password".to_string(),
            source: anyhow::anyhow!("ParameterNotFound"),
        };
        assert_eq!(err.to_string(), "failed to fetch parameter '/app/db/password'");
        let source = std::error::Error::source(&err).expect("source is set");
        assert_eq!(source.to_string(), "ParameterNotFound");
        assert_eq!(err.kind(), "fetch");
    }

    #[test]
    fn test_cause_is_printed_once_in_report() {
        let err = ResolveError::ClientInit(anyhow::anyhow!("no region"));
        let report = format!("{:?}", anyhow::Error::new(err));
        assert_eq!(report.matches("no region").count(), 1);
    }

    #[test]
    fn test_client_init_keeps_source_chain() {
        let cause = anyhow::anyhow!("no region").context("loading AWS config");
        let err = ResolveError::ClientInit(cause);
        let source = std::error::Error::source(&err).expect("source is set");
        assert_eq!(source.to_string(), "loading AWS config");
        assert!(!err.to_string().contains("no region"));
    }
}
