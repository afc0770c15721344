//! Command implementations and dispatch logic.

use fnpack_core::error::FnpackResult;
use std::path::PathBuf;
use tracing::info;

pub mod metadata;


use crate::{output::OutputHandler, Commands};

/// Shared context for all commands
pub struct CommandContext {
    pub cwd: PathBuf,
    pub output: OutputHandler,
}

impl CommandContext {
    /// Create a new command context
    pub fn new() -> FnpackResult<Self> {
        let cwd = std::env::current_dir().map_err(|e| {
            fnpack_core::error::FnpackError::io("Failed to get current directory".to_string(), e)
        })?;

        let output = OutputHandler::new();

        Ok(Self { cwd, output })
    }
}

/// Dispatch a command to its handler
pub fn dispatch_command(command: Commands, ctx: &CommandContext) -> FnpackResult<()> {
    match command {
        Commands::Metadata(args) => {
            info!("Resolving function metadata");
            metadata::execute(&args, ctx)
        },
        Commands::Version => show_version(ctx),
    }
}

fn show_version(ctx: &CommandContext) -> FnpackResult<()> {
    let target = format!("{}-{}", std::env::consts::ARCH, std::env::consts::OS);

    ctx.output.info(&format!("fnpack v{}", env!("CARGO_PKG_VERSION")));
    ctx.output.info(&format!("Built: {}", env!("BUILD_DATE")));
    ctx.output.info(&format!("Target: {}", target));
    ctx.output.info(&format!("Rust: {}", env!("RUSTC_VERSION")));

    Ok(())
}
