mod artifact;
mod commands;
mod config;
mod manifest;
mod pipeline;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use hbpress_core::Diagnostic;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Compile layout parameters and content tables for the print theme.
#[derive(Parser)]
#[command(
    name = "hbpress",
    version,
    about = "Compile layout parameters and content tables for the print theme"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, default_value = "hbpress.toml")]
    config: PathBuf,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress warnings and non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that templates only read defined parameter keys
    Lint,

    /// Compile the parameter table into the symbol artifact
    Params {
        /// Compare with the existing artifact instead of writing it
        #[arg(long)]
        check: bool,
    },

    /// Render every configured content job into its template
    Content {
        /// Compare with the existing artifacts instead of writing them
        #[arg(long)]
        check: bool,
    },

    /// Lint, compile parameters, and render content in one run
    Build {
        /// Also write a JSON manifest with an etag per artifact
        #[arg(long)]
        manifest: Option<PathBuf>,
    },

    /// List hard-coded lengths in templates that bypass the parameter table
    Audit,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = match config::read_config(&cli.config) {
        Ok(c) => c,
        Err(e) => fail(&e, cli.output),
    };

    match cli.command {
        Commands::Lint => commands::lint::cmd_lint(&config, cli.output, cli.quiet),
        Commands::Params { check } => {
            commands::params::cmd_params(&config, check, cli.output, cli.quiet)
        }
        Commands::Content { check } => {
            commands::content::cmd_content(&config, check, cli.output, cli.quiet)
        }
        Commands::Build { manifest } => {
            commands::build::cmd_build(&config, manifest.as_deref(), cli.output, cli.quiet)
        }
        Commands::Audit => commands::audit::cmd_audit(&config, cli.output, cli.quiet),
    }
}

pub(crate) fn report_error(msg: &str, output: OutputFormat) {
    match output {
        OutputFormat::Text => eprintln!("error: {}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}

/// Report a fatal error and exit with status 1.
pub(crate) fn fail(msg: &str, output: OutputFormat) -> ! {
    report_error(msg, output);
    process::exit(1);
}

/// Print hygiene diagnostics to stderr in text mode.
pub(crate) fn report_diagnostics(diagnostics: &[Diagnostic], output: OutputFormat, quiet: bool) {
    if quiet || output == OutputFormat::Json {
        return;
    }
    for d in diagnostics {
        eprintln!("{}", d);
    }
}

pub(crate) fn print_json(value: &serde_json::Value) {
    let pretty = serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e));
    println!("{}", pretty);
}

pub(crate) fn display(path: &Path) -> String {
    path.display().to_string()
}
