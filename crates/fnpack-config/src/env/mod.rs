//! Environment variable naming and lookup
//!
//! Resolution never touches `std::env` directly; it goes through an
//! [`EnvSource`] so callers and tests can supply their own variables.

use std::collections::{BTreeMap, HashMap};
use fnpack_core::error::FnpackError;
use crate::ConfigResult;

/// Read-only access to environment variables
pub trait EnvSource {
    /// Value of `key`, or `None` when unset
    fn get(&self, key: &str) -> Option<String>;
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        // Non-Unicode values are treated as unset
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

/// Value of `key` if it is set to something other than the empty string
pub fn non_empty<E: EnvSource + ?Sized>(env: &E, key: &str) -> Option<String> {
    env.get(key).filter(|value| !value.is_empty())
}

/// Names of the variables that override each metadata field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvNames {
    pub artifact: String,
    pub handler: String,
    pub language_override: String,
}

impl EnvNames {
    /// Variable overriding `artifact`
    pub const ARTIFACT: &'static str = "ARTIFACT";
    /// Variable overriding `handler`
    pub const HANDLER: &'static str = "HANDLER";
    /// Variable overriding `override`
    pub const OVERRIDE: &'static str = "OVERRIDE";

    /// Names with `prefix` prepended, e.g. `RIFF_` gives `RIFF_ARTIFACT`
    pub fn with_prefix(prefix: &str) -> ConfigResult<Self> {
        validate_prefix(prefix)?;
        Ok(Self {
            artifact: format!("{}{}", prefix, Self::ARTIFACT),
            handler: format!("{}{}", prefix, Self::HANDLER),
            language_override: format!("{}{}", prefix, Self::OVERRIDE),
        })
    }
}

impl Default for EnvNames {
    fn default() -> Self {
        Self {
            artifact: Self::ARTIFACT.to_string(),
            handler: Self::HANDLER.to_string(),
            language_override: Self::OVERRIDE.to_string(),
        }
    }
}

fn validate_prefix(prefix: &str) -> ConfigResult<()> {
    if prefix.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(FnpackError::ConfigValidation {
            field: "env_prefix".to_string(),
            reason: format!("Prefix '{}' must not start with a digit", prefix),
        });
    }

    if let Some(c) = prefix.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
        return Err(FnpackError::ConfigValidation {
            field: "env_prefix".to_string(),
            reason: format!("Prefix '{}' contains invalid character '{}'", prefix, c),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_names() {
        let names = EnvNames::default();
        assert_eq!(names.artifact, "ARTIFACT");
        assert_eq!(names.handler, "HANDLER");
        assert_eq!(names.language_override, "OVERRIDE");
    }

    #[test]
    fn test_prefixed_names() {
        let names = EnvNames::with_prefix("RIFF_").unwrap();
        assert_eq!(names.artifact, "RIFF_ARTIFACT");
        assert_eq!(names.handler, "RIFF_HANDLER");
        assert_eq!(names.language_override, "RIFF_OVERRIDE");

        assert_eq!(EnvNames::with_prefix("").unwrap(), EnvNames::default());
    }

    #[test]
    fn test_invalid_prefixes() {
        assert!(EnvNames::with_prefix("1RIFF_").is_err());
        assert!(EnvNames::with_prefix("RIFF-").is_err());
        assert!(EnvNames::with_prefix("RI FF").is_err());
        assert!(EnvNames::with_prefix("RIFF=").is_err());
    }

    #[test]
    fn test_non_empty() {
        let env = HashMap::from([
            ("SET".to_string(), "value".to_string()),
            ("EMPTY".to_string(), String::new()),
        ]);

        assert_eq!(non_empty(&env, "SET"), Some("value".to_string()));
        assert_eq!(non_empty(&env, "EMPTY"), None);
        assert_eq!(non_empty(&env, "MISSING"), None);
    }

    #[test]
    fn test_btree_map_and_reference_sources() {
        let env = BTreeMap::from([("RIFF_HANDLER".to_string(), "main".to_string())]);
        let by_ref: &dyn EnvSource = &env;

        assert_eq!(non_empty(&by_ref, "RIFF_HANDLER"), Some("main".to_string()));
        assert_eq!(non_empty(by_ref, "HANDLER"), None);
    }

    #[test]
    fn test_process_env_reads_path() {
        assert!(ProcessEnv.get("PATH").is_some());
        assert!(ProcessEnv.get("FNPACK_SURELY_UNSET_VARIABLE").is_none());
    }
}
