//! The value handed back to the visualizer.

use serde::Serialize;

/// Result of an introspection request.
///
/// A body that decodes as JSON is returned structured; anything else (an HTML
/// error page, a plaintext `Internal Server Error`) is returned verbatim so the
/// visualizer can show it to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseValue {
    Json(serde_json::Value),
    Text(String),
}

impl ResponseValue {
    /// Decodes a response body, falling back to the raw text when it is not JSON.
    ///
    /// A leading byte order mark is ignored when decoding, as browsers do.
    #[must_use]
    pub fn from_body(body: String) -> Self {
        let unmarked = body.strip_prefix('\u{feff}').unwrap_or(&body);
        match serde_json::from_str(unmarked) {
            Ok(value) => Self::Json(value),
            Err(e) => {
                tracing::debug!(error = %e, len = body.len(), "Response body is not JSON");
                Self::Text(body)
            }
        }
    }

    #[must_use]
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Json(_) => None,
            Self::Text(text) => Some(text),
        }
    }

    #[must_use]
    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json(_))
    }

    /// Whether a JSON response carries a top-level `errors` array.
    #[must_use]
    pub fn has_graphql_errors(&self) -> bool {
        self.as_json()
            .and_then(|value| value.get("errors"))
            .and_then(serde_json::Value::as_array)
            .is_some_and(|errors| !errors.is_empty())
    }
}

impl From<serde_json::Value> for ResponseValue {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

impl From<String> for ResponseValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}
