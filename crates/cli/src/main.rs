mod commands;
mod exit_code;
mod progress;

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use voyager_config::ConfigError;
use voyager_introspect::IntrospectionError;

pub use exit_code::ExitCode;

#[derive(Parser)]
#[command(name = "voyager")]
#[command(about = "Fetch GraphQL introspection results for the schema visualizer", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to voyager config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Force colored output even when not a TTY
    #[arg(long, global = true, conflicts_with = "no_color")]
    color: bool,

    /// Disable colored output
    #[arg(long, global = true, conflicts_with = "color")]
    no_color: bool,

    /// Suppress all output except errors and the response itself
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output verbosity options
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    /// Whether to show progress indicators (spinners)
    pub show_progress: bool,
    /// Whether to show informational output (success messages, warnings)
    pub show_info: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Send an introspection query to a GraphQL endpoint and print the response
    ///
    /// JSON responses are printed as JSON. Anything else the server sends back
    /// (an HTML error page, a plaintext error) is printed as is and the command
    /// exits with a non-zero status.
    Introspect(commands::introspect::IntrospectArgs),

    /// Print the built-in introspection query
    Query,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing();
    configure_colors(cli.color, cli.no_color);

    let output_opts = OutputOptions {
        show_progress: !cli.quiet,
        show_info: !cli.quiet,
    };

    let result = match cli.command {
        Commands::Introspect(args) => {
            commands::introspect::run(args, cli.config.as_deref(), output_opts).await
        }
        Commands::Query => commands::query::run().map(|()| ExitCode::Success),
    };

    let code = match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            classify_error(&err)
        }
    };

    if code != ExitCode::Success {
        tracing::debug!(%code, "Exiting with failure");
        code.exit();
    }
}

/// Map a failure to the exit code describing it.
fn classify_error(err: &anyhow::Error) -> ExitCode {
    if let Some(e) = err.downcast_ref::<IntrospectionError>() {
        return match e {
            IntrospectionError::Network(_) => ExitCode::NetworkError,
            IntrospectionError::InvalidEndpoint { .. }
            | IntrospectionError::InvalidHeader { .. }
            | IntrospectionError::Client(_) => ExitCode::ConfigError,
        };
    }

    if let Some(e) = err.downcast_ref::<ConfigError>() {
        return match e {
            ConfigError::Io(_) => ExitCode::IoError,
            ConfigError::Invalid { .. }
            | ConfigError::UnsupportedFormat(_)
            | ConfigError::Endpoint { .. } => ExitCode::ConfigError,
        };
    }

    if err.downcast_ref::<std::io::Error>().is_some() {
        return ExitCode::IoError;
    }

    // Remaining failures are bad arguments or missing config
    ExitCode::ConfigError
}

/// Initialize tracing, controlled by `RUST_LOG` and written to stderr
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Configure colored output based on flags and environment variables.
///
/// Priority order (highest to lowest):
/// 1. `--color` flag (force colors on)
/// 2. `--no-color` flag (force colors off)
/// 3. `NO_COLOR` environment variable (if set to any value, disable colors)
/// 4. `CLICOLOR_FORCE` environment variable (if set to non-zero, force colors)
/// 5. `CLICOLOR` environment variable (if set to "0", disable colors)
/// 6. Default: colors enabled if stdout is a TTY (handled by `colored` crate)
///
/// See: <https://no-color.org/> and <https://bixense.com/clicolors/>
fn configure_colors(force_color: bool, no_color: bool) {
    use colored::control;

    if force_color {
        control::set_override(true);
    } else if no_color || std::env::var_os("NO_COLOR").is_some() {
        control::set_override(false);
    } else if let Ok(val) = std::env::var("CLICOLOR_FORCE") {
        if !val.is_empty() && val != "0" {
            control::set_override(true);
        }
    } else if std::env::var("CLICOLOR").is_ok_and(|val| val == "0") {
        control::set_override(false);
    }
}
