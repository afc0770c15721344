//! The application being packaged.

use crate::error::{FnpackError, FnpackResult};
use camino::{Utf8Path, Utf8PathBuf};
use std::path::PathBuf;

/// An application rooted at a directory containing the user's function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    root: Utf8PathBuf,
}

impl Application {
    /// Create an application rooted at `root`
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create an application from a native path, rejecting non-UTF-8 paths
    pub fn from_path(root: PathBuf) -> FnpackResult<Self> {
        let root = Utf8PathBuf::try_from(root).map_err(|e| FnpackError::ConfigValidation {
            field: "root".to_string(),
            reason: format!("Application root is not valid UTF-8: {}", e.as_path().display()),
        })?;
        Ok(Self { root })
    }

    /// Root directory of the application
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}
