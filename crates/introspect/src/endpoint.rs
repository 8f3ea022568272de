//! Where requests are sent.
//!
//! The endpoint is looked up every time a request is made, so a host that
//! lets the user edit the URL (a text field, a config reload) can change it
//! between calls without rebuilding the provider.

use crate::{IntrospectionError, Result};
use parking_lot::RwLock;
use reqwest::Url;
use std::fmt;
use std::sync::Arc;

/// Supplies the current endpoint URL.
pub trait EndpointSource: fmt::Debug + Send + Sync {
    /// Returns the endpoint as it stands right now.
    fn current(&self) -> String;
}

impl EndpointSource for String {
    fn current(&self) -> String {
        self.clone()
    }
}

impl EndpointSource for &'static str {
    fn current(&self) -> String {
        (*self).to_string()
    }
}

impl EndpointSource for Url {
    fn current(&self) -> String {
        self.to_string()
    }
}

/// A shared, editable endpoint.
///
/// Clones point at the same value: updating one is visible to every provider
/// holding another.
#[derive(Debug, Clone, Default)]
pub struct Endpoint {
    value: Arc<RwLock<String>>,
}

impl Endpoint {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Arc::new(RwLock::new(value.into())),
        }
    }

    pub fn set(&self, value: impl Into<String>) {
        let value = value.into();
        tracing::debug!(endpoint = %value, "Endpoint updated");
        *self.value.write() = value;
    }

    #[must_use]
    pub fn get(&self) -> String {
        self.value.read().clone()
    }
}

impl EndpointSource for Endpoint {
    fn current(&self) -> String {
        self.get()
    }
}

/// Parses the source's current value into an absolute URL.
pub(crate) fn resolve(source: &dyn EndpointSource) -> Result<Url> {
    let raw = source.current();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(IntrospectionError::InvalidEndpoint {
            endpoint: raw,
            message: "endpoint is empty".to_string(),
        });
    }

    let url = Url::parse(trimmed).map_err(|e| IntrospectionError::InvalidEndpoint {
        endpoint: raw.clone(),
        message: e.to_string(),
    })?;

    // `localhost:8080/graphql` parses with scheme `localhost`
    if !matches!(url.scheme(), "http" | "https") {
        return Err(IntrospectionError::InvalidEndpoint {
            message: format!("unsupported scheme '{}', expected http or https", url.scheme()),
            endpoint: raw,
        });
    }

    Ok(url)
}
