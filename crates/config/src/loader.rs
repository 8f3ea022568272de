use crate::{ConfigError, Result, VoyagerConfig};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names to search for, in order of preference
pub const CONFIG_FILES: &[&str] = &[
    ".voyagerrc.yml",
    ".voyagerrc.yaml",
    ".voyagerrc.json",
    ".voyagerrc",
    "voyager.config.yml",
    "voyager.config.yaml",
    "voyager.config.json",
    "voyager.config.toml",
];

/// Find a config file by walking up the directory tree from the given start directory.
/// Returns the path to the config file if found.
#[tracing::instrument(fields(start = %start_dir.display()))]
pub fn find_config(start_dir: &Path) -> Result<Option<PathBuf>> {
    let mut current_dir = start_dir.to_path_buf();
    let mut checked_dirs = 0;

    loop {
        tracing::trace!(dir = %current_dir.display(), "Checking directory for config files");
        for file_name in CONFIG_FILES {
            let config_path = current_dir.join(file_name);
            if config_path.is_file() {
                tracing::info!(path = %config_path.display(), checked_dirs, "Found config file");
                return Ok(Some(config_path));
            }
        }

        checked_dirs += 1;
        if !current_dir.pop() {
            tracing::debug!(checked_dirs, "No config file found");
            break;
        }
    }

    Ok(None)
}

/// Load a config from the specified path.
/// Automatically detects the format based on file extension.
#[tracing::instrument(fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Result<VoyagerConfig> {
    tracing::debug!("Reading config file");
    let contents = fs::read_to_string(path)?;
    let config = load_config_from_str(&contents, path)?;
    tracing::info!(endpoint = %config.endpoint, "Config loaded successfully");
    Ok(config)
}

/// Load a config from a string.
/// The path is used for error messages and format detection.
#[tracing::instrument(skip(contents), fields(path = %path.display(), size = contents.len()))]
pub fn load_config_from_str(contents: &str, path: &Path) -> Result<VoyagerConfig> {
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("");

    tracing::debug!(extension, file_name, "Detecting config format");

    let config = match extension {
        "yml" | "yaml" => parse_yaml(contents, path)?,
        "json" => parse_json(contents, path)?,
        "toml" => parse_toml(contents, path)?,
        "" if file_name == ".voyagerrc" => {
            // no extension - try YAML first, then JSON
            tracing::trace!("Trying YAML then JSON for .voyagerrc");
            parse_yaml(contents, path).or_else(|_| parse_json(contents, path))?
        }
        _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    };

    validate_config(&config, path)?;

    Ok(config)
}

fn parse_yaml(contents: &str, path: &Path) -> Result<VoyagerConfig> {
    // An empty YAML document means "all defaults"
    if contents.trim().is_empty() {
        return Ok(VoyagerConfig::default());
    }
    serde_saphyr::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("YAML parse error: {e}"),
    })
}

fn parse_json(contents: &str, path: &Path) -> Result<VoyagerConfig> {
    serde_json::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("JSON parse error: {e}"),
    })
}

fn parse_toml(contents: &str, path: &Path) -> Result<VoyagerConfig> {
    toml::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("TOML parse error: {e}"),
    })
}

#[tracing::instrument(skip(config, path), fields(path = %path.display()))]
fn validate_config(config: &VoyagerConfig, path: &Path) -> Result<()> {
    let invalid = |message: String| ConfigError::Invalid {
        path: path.to_path_buf(),
        message,
    };

    if config.endpoint.trim().is_empty() {
        return Err(invalid("`endpoint` must not be empty".to_string()));
    }

    if config.container.trim().is_empty() {
        return Err(invalid("`container` must not be empty".to_string()));
    }

    if let Some(name) = config.headers.keys().find(|name| name.trim().is_empty()) {
        return Err(invalid(format!("header name '{name}' must not be empty")));
    }

    // URL resolution is checked up front when a base is configured; a bare
    // relative endpoint can still be completed by a base supplied later.
    if config.base_url.is_some() {
        config
            .endpoint_url()
            .map_err(|e| invalid(e.to_string()))?;
    }

    tracing::debug!("Config validation passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(suffix).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_yaml() {
        let yaml = r#"
endpoint: https://api.example.com/graphql
headers:
  Authorization: "Bearer token"
container: schema
retry: 2
"#;
        let file = write_temp(".yml", yaml);

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.endpoint, "https://api.example.com/graphql");
        assert_eq!(
            config.headers.get("Authorization").map(String::as_str),
            Some("Bearer token")
        );
        assert_eq!(config.container, "schema");
        assert_eq!(config.retry, 2);
    }

    #[test]
    fn test_load_json() {
        let file = write_temp(
            ".json",
            r#"{"endpoint": "/graphql", "baseUrl": "http://localhost:8080"}"#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(
            config.endpoint_url().unwrap().as_str(),
            "http://localhost:8080/graphql"
        );
    }

    #[test]
    fn test_load_toml() {
        let toml = r#"
endpoint = "http://localhost:4000/graphql"
retry = 1

[headers]
X-API-Key = "key123"
"#;
        let file = write_temp(".toml", toml);

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.retry, 1);
        assert_eq!(config.headers.len(), 1);
    }

    #[test]
    fn test_load_empty_yaml_is_default() {
        let file = write_temp(".yaml", "");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config, VoyagerConfig::default());
    }

    #[test]
    fn test_voyagerrc_without_extension_json() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(".voyagerrc");
        fs::write(&path, r#"{"endpoint": "http://localhost/graphql"}"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.endpoint, "http://localhost/graphql");
    }

    #[test]
    fn test_unsupported_format() {
        let file = write_temp(".ini", "endpoint=/graphql");
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_validation_empty_endpoint() {
        let file = write_temp(".json", r#"{"endpoint": "  "}"#);
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_validation_empty_container() {
        let file = write_temp(".json", r#"{"container": ""}"#);
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_validation_bad_base_url() {
        let file = write_temp(".json", r#"{"baseUrl": "not a url"}"#);
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("baseUrl"));
    }

    #[test]
    fn test_invalid_yaml() {
        let file = write_temp(".yml", "endpoint: [unclosed");
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("YAML parse error"));
    }

    #[test]
    fn test_find_config_in_current_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join(".voyagerrc.yml");
        fs::write(&config_path, "endpoint: /graphql").unwrap();

        let found = find_config(temp_dir.path()).unwrap();
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("voyager.config.toml");
        fs::write(&config_path, "endpoint = \"/graphql\"").unwrap();

        let sub_dir = temp_dir.path().join("subdir");
        fs::create_dir(&sub_dir).unwrap();

        let found = find_config(&sub_dir).unwrap();
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_not_found() {
        let temp_dir = tempfile::tempdir().unwrap();
        let found = find_config(temp_dir.path()).unwrap();
        assert_eq!(found, None);
    }

    #[test]
    fn test_config_file_priority() {
        let temp_dir = tempfile::tempdir().unwrap();

        fs::write(temp_dir.path().join(".voyagerrc.yml"), "endpoint: /yml").unwrap();
        fs::write(
            temp_dir.path().join("voyager.config.json"),
            r#"{"endpoint": "/json"}"#,
        )
        .unwrap();

        let found = find_config(temp_dir.path()).unwrap().unwrap();

        assert_eq!(found.file_name().unwrap(), ".voyagerrc.yml");
    }
}
