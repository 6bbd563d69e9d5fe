use anyhow::{Context, Result, bail};
use aws_config::SdkConfig;
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_ssm::config::Region;
use aws_sdk_ssm::types::ParameterType as SdkParameterType;
use std::sync::Arc;
use tracing::{debug, info};

use super::{Parameter, ParameterStore, ParameterType, StoreConnector};
use crate::config::ResolverConfig;

/// Resolves parameters from AWS SSM Parameter Store.
///
/// With decryption enabled, `SecureString` values work out of the box as long
/// as the process has `ssm:GetParameter` and the corresponding KMS
/// permissions.
pub struct SsmParameterStore {
    client: aws_sdk_ssm::Client,
}

impl SsmParameterStore {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_ssm::Client::new(config),
        }
    }
}

#[async_trait::async_trait]
impl ParameterStore for SsmParameterStore {
    /// Fetches the parameter called `name` (for example `/prod/db/password`).
    async fn get_parameter(&self, name: &str, with_decryption: bool) -> Result<Parameter> {
        let resp = self
            .client
            .get_parameter()
            .name(name)
            .with_decryption(with_decryption)
            .send()
            .await
            .with_context(|| format!("SSM GetParameter failed for '{name}'"))?;

        let parameter = resp
            .parameter
            .ok_or_else(|| anyhow::anyhow!("SSM returned no parameter for '{name}'"))?;
        into_parameter(name, parameter)
    }
}

fn into_parameter(name: &str, parameter: aws_sdk_ssm::types::Parameter) -> Result<Parameter> {
    let kind = parameter_type(parameter.r#type.as_ref());
    let value = parameter
        .value
        .ok_or_else(|| anyhow::anyhow!("SSM parameter '{name}' exists but has no value"))?;
    Ok(Parameter { value, kind })
}

fn parameter_type(sdk: Option<&SdkParameterType>) -> ParameterType {
    match sdk {
        Some(SdkParameterType::StringList) => ParameterType::StringList,
        Some(SdkParameterType::SecureString) => ParameterType::SecureString,
        _ => ParameterType::String,
    }
}

/// Builds an [`SsmParameterStore`] from the ambient AWS configuration (env
/// vars, shared profile files, instance or task role), with any overrides
/// from [`ResolverConfig`] applied on top.
pub struct AmbientSsmConnector {
    config: ResolverConfig,
}

impl AmbientSsmConnector {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }
}

#[async_trait::async_trait]
impl StoreConnector for AmbientSsmConnector {
    async fn connect(&self) -> Result<Arc<dyn ParameterStore>> {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = &self.config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(endpoint) = &self.config.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }
        if let Some(profile) = &self.config.profile {
            loader = loader.profile_name(profile);
        }

        let sdk_config = loader.load().await;
        let region = check_sdk_config(&sdk_config).await?;
        debug!(
            region = %region,
            endpoint = ?sdk_config.endpoint_url(),
            "Loaded ambient AWS configuration"
        );
        info!(region = %region, "SSM client created");

        Ok(Arc::new(SsmParameterStore::new(&sdk_config)))
    }
}

/// Requires a region and resolves credentials once, so a missing profile or
/// role fails here instead of on the first GetParameter.
async fn check_sdk_config(sdk_config: &SdkConfig) -> Result<Region> {
    let Some(region) = sdk_config.region().cloned() else {
        bail!("no AWS region configured; set AWS_REGION or AWSSSM_REGION");
    };
    let Some(provider) = sdk_config.credentials_provider() else {
        bail!("no AWS credentials provider available");
    };
    provider
        .provide_credentials()
        .await
        .context("loading AWS credentials")?;
    Ok(region)
}
