//! `voyager introspect`: run an introspection query and print the response.

use crate::{ExitCode, OutputOptions};
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::Write;
use std::path::{Path, PathBuf};
use voyager_config::{find_config, load_config};
use voyager_introspect::{
    HttpIntrospectionProvider, IntrospectionProvider, ResponseValue, RetryingProvider,
    INTROSPECTION_QUERY,
};

/// How JSON responses are printed. Non-JSON bodies are always printed verbatim.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ResponseFormat {
    /// Indented JSON
    #[default]
    Pretty,
    /// Single-line JSON
    Compact,
}

/// Arguments for `voyager introspect`.
#[derive(Debug, clap::Args)]
pub struct IntrospectArgs {
    /// GraphQL endpoint URL (optional if a config file names one)
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    /// File containing the query to send instead of the built-in introspection query
    #[arg(long, value_name = "FILE")]
    pub query_file: Option<PathBuf>,

    /// HTTP headers to include in the request (can be specified multiple times)
    /// Format: "Header-Name: Header-Value"
    /// These are merged with headers from the config file (CLI takes precedence)
    #[arg(long = "header", short = 'H', value_name = "HEADER")]
    pub headers: Vec<String>,

    /// Number of retry attempts on network failure (overrides config file)
    #[arg(long)]
    pub retry: Option<u32>,

    /// Output format for JSON responses
    #[arg(long, value_enum, default_value = "pretty")]
    pub format: ResponseFormat,

    /// Output file path (writes to stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Resolved request settings from config file and CLI arguments.
#[derive(Debug)]
struct IntrospectSettings {
    url: String,
    headers: Vec<(String, String)>,
    retry: u32,
}

/// Parses a header string in "Name: Value" format.
fn parse_header(header: &str) -> Result<(String, String)> {
    let Some((name, value)) = header.split_once(':') else {
        anyhow::bail!("Invalid header format: '{header}'. Expected 'Header-Name: Header-Value'");
    };
    let name = name.trim().to_string();
    if name.is_empty() {
        anyhow::bail!("Header name cannot be empty");
    }
    Ok((name, value.trim().to_string()))
}

/// Resolve settings from the URL argument or config file, then apply CLI overrides.
fn resolve_settings(
    url: Option<String>,
    config_path: Option<&Path>,
    cli_headers: &[String],
    cli_retry: Option<u32>,
) -> Result<IntrospectSettings> {
    let cli_parsed = cli_headers
        .iter()
        .map(|h| parse_header(h))
        .collect::<Result<Vec<_>>>()
        .context("Failed to parse headers")?;

    // An explicit URL bypasses the config file entirely
    if let Some(url) = url {
        return Ok(IntrospectSettings {
            url,
            headers: cli_parsed,
            retry: cli_retry.unwrap_or(0),
        });
    }

    let config_path = if let Some(path) = config_path {
        path.to_path_buf()
    } else {
        let current_dir = std::env::current_dir()?;
        find_config(&current_dir)
            .context("Failed to search for config")?
            .context(
                "No voyager config file found. Use --config to specify one or provide a URL.\n\n\
                Usage:\n  \
                voyager introspect <URL>\n  \
                voyager --config <FILE> introspect",
            )?
    };

    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    let url = config
        .endpoint_url()
        .context("Config does not name a usable endpoint")?;

    let mut headers = config.header_pairs();
    for (name, value) in cli_parsed {
        // Remove existing header with same name (case-insensitive)
        headers.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        headers.push((name, value));
    }

    Ok(IntrospectSettings {
        url: url.to_string(),
        headers,
        retry: cli_retry.unwrap_or(config.retry),
    })
}

fn read_query(query_file: Option<&Path>) -> Result<String> {
    match query_file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read query from {}", path.display())),
        None => Ok(INTROSPECTION_QUERY.to_string()),
    }
}

fn render(value: &ResponseValue, format: ResponseFormat) -> Result<String> {
    let rendered = match (value, format) {
        (ResponseValue::Json(json), ResponseFormat::Pretty) => serde_json::to_string_pretty(json)?,
        (ResponseValue::Json(json), ResponseFormat::Compact) => serde_json::to_string(json)?,
        (ResponseValue::Text(text), _) => text.clone(),
    };
    Ok(rendered)
}

#[tracing::instrument(skip(args, output_opts), fields(url = ?args.url))]
pub async fn run(
    args: IntrospectArgs,
    config_path: Option<&Path>,
    output_opts: OutputOptions,
) -> Result<ExitCode> {
    let start_time = std::time::Instant::now();

    let settings = resolve_settings(args.url, config_path, &args.headers, args.retry)?;
    let query = read_query(args.query_file.as_deref())?;

    let provider = HttpIntrospectionProvider::builder(settings.url.clone())
        .with_headers(settings.headers)
        .build()
        .context("Failed to create introspection provider")?;
    let provider = RetryingProvider::new(provider, settings.retry);

    // Only spin when stdout is free for it
    let spinner = (output_opts.show_progress && args.output.is_some())
        .then(|| crate::progress::spinner(&format!("Fetching schema from {}...", settings.url)));

    let result = provider.fetch(&query).await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let value = result.with_context(|| format!("Failed to fetch schema from {}", settings.url))?;
    let content = render(&value, args.format)?;

    if let Some(path) = &args.output {
        std::fs::write(path, &content)
            .with_context(|| format!("Failed to write to {}", path.display()))?;

        if output_opts.show_info {
            println!(
                "{} Response written to {}",
                "✓".green(),
                path.display().to_string().cyan()
            );
            println!("  {} {:.2}s", "⏱".dimmed(), start_time.elapsed().as_secs_f64());
        }
    } else {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(content.as_bytes())
            .context("Failed to write to stdout")?;
        if !content.ends_with('\n') {
            handle
                .write_all(b"\n")
                .context("Failed to write to stdout")?;
        }
    }

    match &value {
        ResponseValue::Text(_) => {
            if output_opts.show_info {
                eprintln!(
                    "{} response from {} is not JSON",
                    "warning:".yellow().bold(),
                    settings.url
                );
            }
            Ok(ExitCode::ResponseError)
        }
        ResponseValue::Json(_) if value.has_graphql_errors() => {
            if output_opts.show_info {
                eprintln!(
                    "{} response from {} contains GraphQL errors",
                    "warning:".yellow().bold(),
                    settings.url
                );
            }
            Ok(ExitCode::ResponseError)
        }
        ResponseValue::Json(_) => Ok(ExitCode::Success),
    }
}
