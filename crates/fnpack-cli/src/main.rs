//! # fnpack-cli
//!
//! Command line access to function metadata resolution.
//!
//! Sets up logging and panic reporting, parses arguments and dispatches to
//! the command handlers. Resolved records go to stdout; logs and errors go
//! to stderr.

use clap::{Parser, Subcommand};
use fnpack_core::error::FnpackResult;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{metadata::MetadataArgs, CommandContext};
use output::{colors::ColorSupport, errors::ErrorFormatter};

/// Resolve the metadata that decides how a function is packaged
#[derive(Parser, Debug)]
#[command(name = "fnpack", version, about = "Function metadata for buildpacks")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve metadata.toml and environment overrides for an application
    Metadata(MetadataArgs),
    /// Show version information
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.log_json);
    setup_panic_handler();

    debug!("Starting fnpack v{}", env!("CARGO_PKG_VERSION"));

    let colors = if cli.log_json {
        ColorSupport::disabled()
    } else {
        ColorSupport::detect()
    };

    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!("Command failed: {:?}", e);
            eprint!("{}", ErrorFormatter::with_colors(colors).format_error(&e));
            ExitCode::FAILURE
        },
    }
}

fn run_cli(cli: Cli) -> FnpackResult<()> {
    let ctx = CommandContext::new()?;
    commands::dispatch_command(cli.command, &ctx)
}

fn setup_logging(verbose: bool, json: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "fnpack={},fnpack_config={},fnpack_core={}",
            level, level, level
        ))
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("fnpack encountered an unexpected error: {}", panic_info);
        eprintln!("fnpack crashed! This is a bug.");
        eprintln!("Error: {}", panic_info);
    }));
}
