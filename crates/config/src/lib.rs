//! Configuration for the GraphQL schema visualizer.
//!
//! Settings live in a `.voyagerrc` (YAML or JSON) or `voyager.config.*` file
//! found by walking up from the working directory.

mod config;
mod error;
mod loader;

pub use config::{VoyagerConfig, DEFAULT_CONTAINER, DEFAULT_ENDPOINT};
pub use error::{ConfigError, Result};
pub use loader::{find_config, load_config, load_config_from_str, CONFIG_FILES};
