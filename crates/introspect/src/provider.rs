//! The seam between the visualizer and whatever answers its introspection query.

use crate::{ResponseValue, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Answers an introspection query on behalf of the visualizer.
///
/// The visualizer builds the query itself and only cares about getting a
/// [`ResponseValue`] back, so implementations are free to hit the network,
/// replay a recorded response, or wrap another provider.
#[async_trait]
pub trait IntrospectionProvider: Send + Sync {
    async fn fetch(&self, query: &str) -> Result<ResponseValue>;
}

#[async_trait]
impl<P: IntrospectionProvider + ?Sized> IntrospectionProvider for Arc<P> {
    async fn fetch(&self, query: &str) -> Result<ResponseValue> {
        (**self).fetch(query).await
    }
}

#[async_trait]
impl<P: IntrospectionProvider + ?Sized> IntrospectionProvider for Box<P> {
    async fn fetch(&self, query: &str) -> Result<ResponseValue> {
        (**self).fetch(query).await
    }
}

/// Serves the same response for every query.
///
/// Useful for rendering a schema captured earlier, and as a stand-in during tests.
#[derive(Debug, Clone)]
pub struct StaticProvider {
    response: ResponseValue,
}

impl StaticProvider {
    #[must_use]
    pub fn new(response: impl Into<ResponseValue>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

#[async_trait]
impl IntrospectionProvider for StaticProvider {
    async fn fetch(&self, _query: &str) -> Result<ResponseValue> {
        Ok(self.response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_static_provider_ignores_query() {
        let provider = StaticProvider::new(json!({"data": {"__schema": {}}}));

        let first = provider.fetch("query A { __typename }").await.unwrap();
        let second = provider.fetch("query B { __schema { types { name } } }").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first, ResponseValue::Json(json!({"data": {"__schema": {}}})));
    }

    #[tokio::test]
    async fn test_provider_behind_trait_object() {
        let provider: Arc<dyn IntrospectionProvider> =
            Arc::new(StaticProvider::new("Service Unavailable".to_string()));

        let value = provider.fetch("{ __typename }").await.unwrap();
        assert_eq!(value, ResponseValue::Text("Service Unavailable".into()));
    }
}
