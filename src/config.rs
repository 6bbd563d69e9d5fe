use anyhow::Result;
use serde::Deserialize;

/// Overrides applied on top of the ambient AWS configuration.
///
/// Every field is optional; anything left unset comes from the usual AWS
/// sources (`AWS_REGION`, `AWS_PROFILE`, shared config files, instance
/// metadata). Stored as a plain JSON object on disk:
/// ```json
/// {
///   "region": "eu-west-1",
///   "endpoint_url": "http://localhost:4566",
///   "profile": "staging"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
    pub region: Option<String>,
    pub endpoint_url: Option<String>,
    pub profile: Option<String>,
}

impl ResolverConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Reads `AWSSSM_REGION`, `AWSSSM_ENDPOINT_URL` and `AWSSSM_PROFILE`.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(get: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| get(key).filter(|v| !v.is_empty());
        Self {
            region: non_empty("AWSSSM_REGION"),
            endpoint_url: non_empty("AWSSSM_ENDPOINT_URL"),
            profile: non_empty("AWSSSM_PROFILE"),
        }
    }

    /// Fills every unset field from `fallback`.
    pub fn or(self, fallback: ResolverConfig) -> Self {
        Self {
            region: self.region.or(fallback.region),
            endpoint_url: self.endpoint_url.or(fallback.endpoint_url),
            profile: self.profile.or(fallback.profile),
        }
    }
}
