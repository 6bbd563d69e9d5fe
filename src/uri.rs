//! Parsing of `awsssm://<parameter-name>` references.

use url::Url;

use crate::error::{ResolveError, UriError};

/// Scheme token this crate registers with the host configuration framework.
pub const SCHEME: &str = "awsssm";

/// A validated reference to one SSM parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterUri {
    name: String,
}

impl ParameterUri {
    /// Parses `raw` and checks that it uses the `awsssm` scheme.
    ///
    /// Everything after `://` is the parameter name, passed through as-is:
    /// `awsssm:///prod/db/password` names `/prod/db/password`. The name's
    /// shape is not checked here; SSM rejects names it does not know.
    ///
    /// # Errors
    ///
    /// [`ResolveError::InvalidUri`] if `raw` is not a URI at all,
    /// [`ResolveError::UnsupportedScheme`] if the scheme is anything other
    /// than exactly `awsssm`.
    pub fn parse(raw: &str) -> Result<Self, ResolveError> {
        let invalid = |source: UriError| ResolveError::InvalidUri {
            uri: raw.to_string(),
            source,
        };

        // `Url` drops these silently; the name below is cut from `raw`.
        if raw.starts_with(' ') || raw.ends_with(' ') || raw.chars().any(|c| c.is_ascii_control())
        {
            return Err(invalid(UriError::StrayCharacters));
        }
        let parsed = Url::parse(raw).map_err(|e| invalid(UriError::Parse(e)))?;

        // `Url` lowercases the scheme, so match against the original text.
        let (scheme, rest) = raw
            .split_once(':')
            .unwrap_or((parsed.scheme(), parsed.path()));
        if scheme != SCHEME {
            return Err(ResolveError::UnsupportedScheme {
                scheme: scheme.to_string(),
            });
        }

        let name = rest.strip_prefix("//").unwrap_or(rest);
        Ok(Self {
            name: name.to_string(),
        })
    }

    /// The SSM parameter name (or path) to fetch.
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_absolute_path() {
        let uri = ParameterUri::parse("awsssm:///my/param").unwrap();
        assert_eq!(uri.name(), "/my/param");
    }

    #[test]
    fn test_parse_keeps_everything_after_authority_marker() {
        let uri = ParameterUri::parse("awsssm://plain-name").unwrap();
        assert_eq!(uri.name(), "plain-name");

        let uri = ParameterUri::parse("awsssm://team/service/key").unwrap();
        assert_eq!(uri.name(), "team/service/key");
    }

    #[test]
    fn test_parse_empty_name_is_passed_through() {
        let uri = ParameterUri::parse("awsssm://").unwrap();
        assert_eq!(uri.name(), "");
    }

    #[test]
    fn test_parse_rejects_other_schemes() {
        let err = ParameterUri::parse("https://example.com/param").unwrap_err();
        assert!(
            matches!(err, ResolveError::UnsupportedScheme { ref scheme } if scheme == "https")
        );
    }

    #[test]
    fn test_scheme_is_case_sensitive() {
        let err = ParameterUri::parse("AWSSSM:///my/param").unwrap_err();
        assert!(
            matches!(err, ResolveError::UnsupportedScheme { ref scheme } if scheme == "AWSSSM")
        );
    }

    #[test]
    fn test_parse_rejects_non_uri() {
        let err = ParameterUri::parse("not a uri").unwrap_err();
        assert!(matches!(err, ResolveError::InvalidUri { .. }));
    }

    #[test]
    fn test_parse_rejects_surrounding_space() {
        for raw in [" awsssm:///p", "awsssm:///p "] {
            let err = ParameterUri::parse(raw).unwrap_err();
            assert!(matches!(
                err,
                ResolveError::InvalidUri {
                    source: UriError::StrayCharacters,
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_parse_rejects_embedded_tab_and_newline() {
        for raw in ["awsssm:///my\tparam", "awsssm:///my/param\n", "awsssm:///my\r\nparam"] {
            let err = ParameterUri::parse(raw).unwrap_err();
            assert!(matches!(
                err,
                ResolveError::InvalidUri {
                    source: UriError::StrayCharacters,
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_parse_rejects_bad_port() {
        let err = ParameterUri::parse("awsssm://host:port/param").unwrap_err();
        assert!(matches!(
            err,
            ResolveError::InvalidUri {
                source: UriError::Parse(url::ParseError::InvalidPort),
                ..
            }
        ));
    }
}
