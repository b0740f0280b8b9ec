//! # formval CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use formval_cli::check::{run_check, CheckArgs};
use formval_cli::install::{run_install, InstallArgs};
use formval_schema::ValidatorConfig;

/// Schema-driven form validation.
///
/// Validates view snapshots against JSON form schemas and installs the
/// built library into host applications.
#[derive(Parser, Debug)]
#[command(name = "formval", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a validator configuration file (YAML or JSON).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a view snapshot against a form schema.
    Check(CheckArgs),

    /// Copy the built library into a host app and register it in the manifest.
    Install(InstallArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let base = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let result = load_config(cli.config.as_ref()).and_then(|config| match &cli.command {
        Commands::Check(args) => run_check(args, &config, &base),
        Commands::Install(args) => run_install(args, &base),
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<ValidatorConfig> {
    match path {
        Some(p) => {
            let config = ValidatorConfig::from_path(p)
                .with_context(|| format!("failed to load config {}", p.display()))?;
            tracing::debug!(config = %p.display(), ?config, "loaded validator config");
            Ok(config)
        }
        None => Ok(ValidatorConfig::default()),
    }
}
