//! Error types and result aliases for fnpack operations.
//!
//! A single error type covers every failure a metadata resolution can surface,
//! with messages that point at the offending file and an optional hint.

use thiserror::Error;

/// Unified error type for all fnpack operations
#[derive(Error, Debug)]
pub enum FnpackError {
    // Metadata errors
    #[error("Failed to access {path}")]
    FileAccess {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode {path}: {message} at line {line}, column {column}")]
    Decode {
        path: String,
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Configuration field '{field}' is invalid: {reason}")]
    ConfigValidation { field: String, reason: String },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for fnpack operations
pub type FnpackResult<T> = Result<T, FnpackError>;

impl FnpackError {
    /// Create a file access error for `path`
    pub fn file_access(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            source,
        }
    }

    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Whether the metadata file existed but could not be decoded
    pub fn is_decode(&self) -> bool {
        matches!(self, FnpackError::Decode { .. })
    }

    /// Whether the metadata file could not be read for a reason other than absence
    pub fn is_file_access(&self) -> bool {
        matches!(self, FnpackError::FileAccess { .. })
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            FnpackError::FileAccess { source, .. } => match source.kind() {
                std::io::ErrorKind::PermissionDenied => {
                    Some("Check the permissions of the application directory and metadata.toml")
                },
                _ => Some("Make sure metadata.toml is a regular, readable file"),
            },
            FnpackError::Decode { .. } => Some(
                "metadata.toml accepts the string keys `artifact`, `handler` and `override`",
            ),
            FnpackError::ConfigValidation { .. } => {
                Some("Environment prefixes may only contain ASCII letters, digits and '_'")
            },
            FnpackError::Io { .. } => None,
        }
    }
}
