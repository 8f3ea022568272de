use crate::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

/// Endpoint used when the config does not name one.
pub const DEFAULT_ENDPOINT: &str = "/graphql";

/// Element the visualizer renders into when the config does not name one.
pub const DEFAULT_CONTAINER: &str = "voyager";

/// Visualizer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VoyagerConfig {
    /// GraphQL endpoint, absolute or relative to `base_url`
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Origin that a relative `endpoint` is resolved against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// HTTP headers to include in every introspection request
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,

    /// Identifier of the element the visualizer mounts into
    #[serde(default = "default_container")]
    pub container: String,

    /// Number of retry attempts on network failure (default: 0)
    #[serde(default)]
    pub retry: u32,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_container() -> String {
    DEFAULT_CONTAINER.to_string()
}

impl Default for VoyagerConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            base_url: None,
            headers: HashMap::new(),
            container: default_container(),
            retry: 0,
        }
    }
}

impl VoyagerConfig {
    /// Config pointing at an absolute endpoint, everything else defaulted.
    #[must_use]
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// The endpoint as an absolute URL.
    ///
    /// A relative endpoint such as `/graphql` is joined onto `base_url`.
    pub fn endpoint_url(&self) -> Result<Url> {
        let endpoint_error = |message: String| ConfigError::Endpoint {
            endpoint: self.endpoint.clone(),
            message,
        };

        match Url::parse(&self.endpoint) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let base = self.base_url.as_deref().ok_or_else(|| {
                    endpoint_error("relative endpoint requires `baseUrl`".to_string())
                })?;
                let base = Url::parse(base)
                    .map_err(|e| endpoint_error(format!("invalid `baseUrl` '{base}': {e}")))?;
                base.join(&self.endpoint)
                    .map_err(|e| endpoint_error(e.to_string()))
            }
            Err(e) => Err(endpoint_error(e.to_string())),
        }
    }

    /// Headers as name/value pairs.
    #[must_use]
    pub fn header_pairs(&self) -> Vec<(String, String)> {
        self.headers
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_document() {
        let config: VoyagerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, VoyagerConfig::default());
        assert_eq!(config.endpoint, "/graphql");
        assert_eq!(config.container, "voyager");
        assert_eq!(config.retry, 0);
    }

    #[test]
    fn test_camel_case_keys() {
        let config: VoyagerConfig = serde_json::from_str(
            r#"{"endpoint": "/api/graphql", "baseUrl": "http://localhost:8080"}"#,
        )
        .unwrap();
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:8080"));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let result = serde_json::from_str::<VoyagerConfig>(r#"{"endpiont": "/graphql"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_endpoint_url_absolute() {
        let config = VoyagerConfig::with_endpoint("https://api.example.com/graphql");
        assert_eq!(
            config.endpoint_url().unwrap().as_str(),
            "https://api.example.com/graphql"
        );
    }

    #[test]
    fn test_endpoint_url_relative_to_base() {
        let config = VoyagerConfig {
            base_url: Some("http://localhost:8080/app/".to_string()),
            ..VoyagerConfig::default()
        };
        // A leading slash replaces the base path
        assert_eq!(
            config.endpoint_url().unwrap().as_str(),
            "http://localhost:8080/graphql"
        );
    }

    #[test]
    fn test_endpoint_url_relative_without_base() {
        let err = VoyagerConfig::default().endpoint_url().unwrap_err();
        assert!(matches!(err, ConfigError::Endpoint { ref endpoint, .. } if endpoint == "/graphql"));
    }

    #[test]
    fn test_endpoint_url_invalid_base() {
        let config = VoyagerConfig {
            base_url: Some("localhost".to_string()),
            ..VoyagerConfig::default()
        };
        assert!(config.endpoint_url().is_err());
    }

    #[test]
    fn test_serialize_skips_empty() {
        let json = serde_json::to_value(VoyagerConfig::default()).unwrap();
        assert!(json.get("headers").is_none());
        assert!(json.get("baseUrl").is_none());
    }
}
