//! HTTP introspection provider.
//!
//! Sends the visualizer's query to a GraphQL endpoint the way a browser page
//! would: a JSON `POST` with cookies attached, reading back whatever the
//! server answered.

use crate::endpoint::{self, EndpointSource};
use crate::{IntrospectionError, IntrospectionProvider, ResponseValue, Result};
use async_trait::async_trait;
use reqwest::cookie::Jar;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde::Serialize;
use std::sync::Arc;

const APPLICATION_JSON: &str = "application/json";

/// Request body: `{"query": "..."}`.
#[derive(Debug, Serialize)]
struct QueryBody<'a> {
    query: &'a str,
}

/// Provider that posts introspection queries to a GraphQL endpoint.
///
/// Cookies are kept in a jar shared by every request made through this
/// provider (and its clones), so session cookies set by the server are sent
/// back on later calls.
///
/// # Examples
///
/// ```no_run
/// use voyager_introspect::{HttpIntrospectionProvider, IntrospectionProvider, INTROSPECTION_QUERY};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = HttpIntrospectionProvider::builder("https://api.example.com/graphql")
///     .with_header("Authorization", "Bearer my-token")
///     .build()?;
/// let response = provider.fetch(INTROSPECTION_QUERY).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpIntrospectionProvider {
    endpoint: Arc<dyn EndpointSource>,
    client: reqwest::Client,
    headers: HeaderMap,
    cookies: Arc<Jar>,
}

impl HttpIntrospectionProvider {
    /// Starts building a provider that reads its URL from `endpoint`.
    #[must_use]
    pub fn builder(endpoint: impl EndpointSource + 'static) -> HttpIntrospectionProviderBuilder {
        HttpIntrospectionProviderBuilder {
            endpoint: Arc::new(endpoint),
            headers: Vec::new(),
            cookies: None,
        }
    }

    /// Provider with no extra headers and a fresh cookie jar.
    pub fn new(endpoint: impl EndpointSource + 'static) -> Result<Self> {
        Self::builder(endpoint).build()
    }

    /// The cookie jar used for every request.
    #[must_use]
    pub fn cookies(&self) -> &Arc<Jar> {
        &self.cookies
    }
}

#[async_trait]
impl IntrospectionProvider for HttpIntrospectionProvider {
    #[tracing::instrument(skip(self, query), fields(query_len = query.len()))]
    async fn fetch(&self, query: &str) -> Result<ResponseValue> {
        let url = endpoint::resolve(self.endpoint.as_ref())?;

        tracing::info!(endpoint = %url, "Sending introspection query");
        let endpoint = url.to_string();
        let response = self
            .client
            .post(url)
            .headers(self.headers.clone())
            .json(&QueryBody { query })
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Introspection request failed");
                // A request that could not be built will never succeed on retry
                if e.is_builder() {
                    IntrospectionError::InvalidEndpoint {
                        endpoint,
                        message: e.to_string(),
                    }
                } else {
                    IntrospectionError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "Received response");

        // The status code is not inspected: error pages are handed to the
        // visualizer like any other body.
        let body = response
            .text()
            .await
            .map_err(|e| IntrospectionError::Network(e.to_string()))?;

        let value = ResponseValue::from_body(body);
        if !value.is_json() {
            tracing::warn!(
                status = status.as_u16(),
                "Response is not JSON, returning raw text"
            );
        }
        Ok(value)
    }
}

/// Builder for [`HttpIntrospectionProvider`].
#[derive(Debug)]
pub struct HttpIntrospectionProviderBuilder {
    endpoint: Arc<dyn EndpointSource>,
    headers: Vec<(String, String)>,
    cookies: Option<Arc<Jar>>,
}

impl HttpIntrospectionProviderBuilder {
    /// Adds a header sent with every request, e.g. for authentication.
    ///
    /// `Accept` and `Content-Type` are always `application/json`; values given
    /// here for those two are ignored.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Adds multiple headers from an iterator.
    #[must_use]
    pub fn with_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in headers {
            self.headers.push((name.into(), value.into()));
        }
        self
    }

    /// Uses an existing cookie jar instead of an empty one.
    #[must_use]
    pub fn with_cookie_jar(mut self, jar: Arc<Jar>) -> Self {
        self.cookies = Some(jar);
        self
    }

    pub fn build(self) -> Result<HttpIntrospectionProvider> {
        let headers = request_headers(&self.headers)?;
        let cookies = self.cookies.unwrap_or_default();

        tracing::debug!(extra_headers = self.headers.len(), "Creating HTTP client");
        let client = reqwest::Client::builder()
            .cookie_provider(Arc::clone(&cookies))
            .build()
            .map_err(|e| IntrospectionError::Client(e.to_string()))?;

        Ok(HttpIntrospectionProvider {
            endpoint: self.endpoint,
            client,
            headers,
            cookies,
        })
    }
}

/// Custom headers followed by the fixed JSON `Accept`/`Content-Type` pair.
fn request_headers(extra: &[(String, String)]) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    for (name, value) in extra {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| IntrospectionError::InvalidHeader {
                name: name.clone(),
                message: e.to_string(),
            })?;
        let header_value =
            HeaderValue::from_str(value).map_err(|e| IntrospectionError::InvalidHeader {
                name: name.clone(),
                message: e.to_string(),
            })?;

        if header_name == ACCEPT || header_name == CONTENT_TYPE {
            tracing::warn!(header = %header_name, "Ignoring override of fixed header");
            continue;
        }
        headers.insert(header_name, header_value);
    }

    headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(n, v)| ((*n).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_request_headers_defaults() {
        let map = request_headers(&[]).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map[ACCEPT], APPLICATION_JSON);
        assert_eq!(map[CONTENT_TYPE], APPLICATION_JSON);
    }

    #[test]
    fn test_request_headers_custom() {
        let map = request_headers(&headers(&[
            ("Authorization", "Bearer token"),
            ("X-API-Key", "key123"),
        ]))
        .unwrap();

        assert_eq!(map["authorization"], "Bearer token");
        assert_eq!(map["x-api-key"], "key123");
    }

    #[test]
    fn test_request_headers_cannot_override_json() {
        let map = request_headers(&headers(&[
            ("Accept", "text/html"),
            ("content-type", "text/plain"),
        ]))
        .unwrap();

        assert_eq!(map.get_all(ACCEPT).iter().count(), 1);
        assert_eq!(map[ACCEPT], APPLICATION_JSON);
        assert_eq!(map[CONTENT_TYPE], APPLICATION_JSON);
    }

    #[test]
    fn test_request_headers_invalid_name() {
        let err = request_headers(&headers(&[("Bad Header", "value")])).unwrap_err();
        assert!(matches!(err, IntrospectionError::InvalidHeader { ref name, .. } if name == "Bad Header"));
    }

    #[test]
    fn test_request_headers_invalid_value() {
        let err = request_headers(&headers(&[("X-Token", "line\nbreak")])).unwrap_err();
        assert!(matches!(err, IntrospectionError::InvalidHeader { .. }));
    }

    #[test]
    fn test_build_rejects_bad_header() {
        let result = HttpIntrospectionProvider::builder("http://localhost/graphql")
            .with_header("", "value")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_query_body_shape() {
        let body = serde_json::to_string(&QueryBody { query: "{ __typename }" }).unwrap();
        assert_eq!(body, r#"{"query":"{ __typename }"}"#);
    }
}
