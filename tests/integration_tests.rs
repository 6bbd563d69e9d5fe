use awsssm_provider::store::ParameterType;
use awsssm_provider::store::mock::{MockConnector, MockParameterStore};
use awsssm_provider::{CallContext, ConfigProvider, ResolveError, ResolvedValue, Resolver};
use std::collections::HashMap;
use std::sync::Arc;

/// Minimal host: dispatches source URIs to providers by scheme, as a
/// configuration framework would.
struct Host {
    providers: HashMap<&'static str, Box<dyn ConfigProvider>>,
}

impl Host {
    fn new(providers: Vec<Box<dyn ConfigProvider>>) -> Self {
        Self {
            providers: providers.into_iter().map(|p| (p.scheme(), p)).collect(),
        }
    }

    async fn load(&self, sources: &[&str]) -> Result<Vec<ResolvedValue>, ResolveError> {
        let ctx = CallContext::new();
        let mut out = Vec::new();
        for uri in sources {
            let scheme = uri.split_once(':').map(|(s, _)| s).unwrap_or_default();
            let provider = self.providers.get(scheme).expect("provider registered");
            out.push(provider.retrieve(uri, &ctx, None).await?);
        }
        for provider in self.providers.values() {
            provider.shutdown(&ctx).await?;
        }
        Ok(out)
    }
}

#[tokio::test]
async fn test_full_pipeline() {
    let store = Arc::new(
        MockParameterStore::new()
            .with_parameter("/svc/endpoint", ParameterType::String, "https://db.internal")
            .with_parameter("/svc/password", ParameterType::SecureString, "hunter2")
            .with_parameter("/svc/brokers", ParameterType::StringList, "k1:9092,k2:9092,"),
    );
    let connector = Arc::new(MockConnector::new(store.clone()));
    let host = Host::new(vec![Box::new(Resolver::with_connector(connector.clone()))]);

    let values = host
        .load(&[
            "awsssm:///svc/endpoint",
            "awsssm:///svc/password",
            "awsssm:///svc/brokers",
        ])
        .await
        .expect("all sources resolve");

    assert_eq!(values[0].as_scalar(), Some("https://db.internal"));
    assert_eq!(values[1].as_scalar(), Some("hunter2"));
    assert_eq!(
        values[2].clone().into_json(),
        serde_json::json!(["k1:9092", "k2:9092", ""])
    );
    assert_eq!(connector.connects(), 1);
    assert_eq!(store.calls(), 3);
}

#[tokio::test]
async fn test_missing_parameter_aborts_load() {
    let store = Arc::new(MockParameterStore::new());
    let host = Host::new(vec![Box::new(Resolver::with_connector(MockConnector::new(store)))]);

    let err = host.load(&["awsssm:///does/not/exist"]).await.unwrap_err();
    assert_eq!(err.kind(), "fetch");
    assert!(err.to_string().contains("/does/not/exist"));
}
