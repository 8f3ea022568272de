//! Introspection provider for a GraphQL schema visualizer.
//!
//! The visualizer builds its own introspection query and asks an
//! [`IntrospectionProvider`] to run it. [`HttpIntrospectionProvider`] posts the
//! query to a GraphQL endpoint and returns the decoded JSON, or the raw body
//! when the server answered with something that is not JSON.
//!
//! # Examples
//!
//! ## Fetching a schema
//!
//! ```no_run
//! use voyager_introspect::{HttpIntrospectionProvider, IntrospectionProvider, INTROSPECTION_QUERY};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = HttpIntrospectionProvider::new("https://api.example.com/graphql")?;
//!     let response = provider.fetch(INTROSPECTION_QUERY).await?;
//!     println!("{}", serde_json::to_string_pretty(&response)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Handing the provider to a visualizer
//!
//! ```no_run
//! use voyager_introspect::widget::{self, Container, VoyagerOptions, Widget};
//! use voyager_introspect::{Endpoint, HttpIntrospectionProvider, RetryingProvider};
//!
//! fn mount<W: Widget>(visualizer: &mut W) -> Result<W::Handle, Box<dyn std::error::Error>> {
//!     let endpoint = Endpoint::new("http://localhost:8080/graphql");
//!     let provider = RetryingProvider::new(HttpIntrospectionProvider::new(endpoint)?, 2);
//!     Ok(widget::init(visualizer, &Container::default(), VoyagerOptions::new(provider)))
//! }
//! ```

mod client;
mod endpoint;
mod error;
mod provider;
mod query;
mod retry;
mod value;
pub mod widget;

pub use client::{HttpIntrospectionProvider, HttpIntrospectionProviderBuilder};
pub use endpoint::{Endpoint, EndpointSource};
pub use error::{IntrospectionError, Result};
pub use provider::{IntrospectionProvider, StaticProvider};
pub use query::INTROSPECTION_QUERY;
pub use reqwest::cookie::Jar as CookieJar;
pub use retry::RetryingProvider;
pub use value::ResponseValue;
