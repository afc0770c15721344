//! Function metadata resolution for fnpack
//!
//! This crate reads the optional `metadata.toml` at an application root and
//! overlays values taken from the environment, producing the record that
//! decides how a function gets packaged.

pub mod env;
pub mod metadata;
pub mod toml;

// Re-export main types
pub use crate::env::{EnvNames, EnvSource, ProcessEnv};
pub use crate::metadata::{
    FieldSource, MetadataField, MetadataRecord, MetadataResolver, MetadataSource, Provenance,
    Resolution,
};
pub use crate::toml::{metadata_path, parse_metadata_toml, METADATA_FILE_NAME};

use fnpack_core::error::FnpackError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, FnpackError>;
