//! `fnpack metadata`: resolve and print an application's function metadata.

use clap::{Args, ValueEnum};
use fnpack_config::{
    toml::serialize_metadata_toml, EnvNames, EnvSource, MetadataField, MetadataResolver,
    MetadataSource, ProcessEnv, Resolution,
};
use fnpack_core::{Application, FnpackError, FnpackResult};
use std::path::PathBuf;
use tracing::debug;

use super::CommandContext;

/// Output format for the resolved record
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `key: value` line per field
    Text,
    /// metadata.toml syntax, unset fields omitted
    Toml,
    /// A single JSON object
    Json,
}

#[derive(Args, Debug)]
pub struct MetadataArgs {
    /// Application root containing metadata.toml (defaults to the current directory)
    #[arg(long, env = "FNPACK_ROOT", value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Prefix for the ARTIFACT, HANDLER and OVERRIDE variables, e.g. RIFF_
    #[arg(long, value_name = "PREFIX", default_value = "")]
    pub env_prefix: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Show where each value came from
    #[arg(long)]
    pub show_source: bool,
}

pub fn execute(args: &MetadataArgs, ctx: &CommandContext) -> FnpackResult<()> {
    execute_with_env(args, ctx, &ProcessEnv)
}

pub(crate) fn execute_with_env<E: EnvSource + ?Sized>(
    args: &MetadataArgs,
    ctx: &CommandContext,
    env: &E,
) -> FnpackResult<()> {
    let resolution = resolve(args, ctx, env)?;

    if resolution.source == MetadataSource::Absent && resolution.metadata.is_empty() {
        ctx.output.warn("No metadata.toml found and no overrides set");
    }

    ctx.output.print(&render(&resolution, args.format, args.show_source)?);
    Ok(())
}

pub(crate) fn resolve<E: EnvSource + ?Sized>(
    args: &MetadataArgs,
    ctx: &CommandContext,
    env: &E,
) -> FnpackResult<Resolution> {
    let root = match &args.root {
        Some(root) => ctx.cwd.join(root),
        None => ctx.cwd.clone(),
    };
    let application = Application::from_path(root)?;
    let resolver = MetadataResolver::new(EnvNames::with_prefix(&args.env_prefix)?);

    debug!("Application root: {}", application.root());
    resolver.resolve_application(&application, env)
}

pub(crate) fn render(
    resolution: &Resolution,
    format: OutputFormat,
    show_source: bool,
) -> FnpackResult<String> {
    let metadata = &resolution.metadata;

    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            for field in MetadataField::ALL {
                output.push_str(&format!("{}: {}", field.key(), metadata.get(field)));
                if show_source {
                    output.push_str(&format!(" ({})", resolution.provenance.get(field)));
                }
                output.push('\n');
            }
            Ok(output)
        },
        OutputFormat::Toml => serialize_metadata_toml(metadata),
        OutputFormat::Json => {
            let mut value = serde_json::json!({
                "artifact": metadata.artifact,
                "handler": metadata.handler,
                "override": metadata.language_override,
            });
            if show_source {
                value["file"] = match &resolution.source {
                    MetadataSource::File(path) => serde_json::Value::from(path.as_str()),
                    MetadataSource::Absent => serde_json::Value::Null,
                };
                value["sources"] = MetadataField::ALL
                    .into_iter()
                    .map(|field| {
                        let source = resolution.provenance.get(field).to_string();
                        (field.key().to_string(), serde_json::Value::from(source))
                    })
                    .collect::<serde_json::Map<_, _>>()
                    .into();
            }
            serde_json::to_string_pretty(&value).map_err(|e| FnpackError::ConfigValidation {
                field: "format".to_string(),
                reason: format!("JSON serialization error: {}", e),
            })
        },
    }
}
