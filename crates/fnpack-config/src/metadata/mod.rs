//! Function metadata resolution
//!
//! A function's metadata comes from two layers: the optional `metadata.toml`
//! in the application root, and environment variables. A non-empty environment
//! variable always wins over the file; an empty one is ignored.

use std::fmt;
use camino::{Utf8Path, Utf8PathBuf};
use fnpack_core::Application;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use crate::{
    env::{non_empty, EnvNames, EnvSource},
    toml::{load_from_file, metadata_path},
    ConfigResult,
};


/// Contents of an application's metadata.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataRecord {
    /// Path to the main function artifact: a jar, an executable, etc.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub artifact: String,

    /// Finer grained entry point within the artifact, such as a class or function name
    #[serde(skip_serializing_if = "String::is_empty")]
    pub handler: String,

    /// Language forced by the user, bypassing detection
    #[serde(rename = "override", skip_serializing_if = "String::is_empty")]
    pub language_override: String,
}

/// One of the three metadata fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataField {
    Artifact,
    Handler,
    Override,
}

impl MetadataField {
    pub const ALL: [MetadataField; 3] =
        [MetadataField::Artifact, MetadataField::Handler, MetadataField::Override];

    /// Key used for this field in metadata.toml
    pub fn key(self) -> &'static str {
        match self {
            MetadataField::Artifact => "artifact",
            MetadataField::Handler => "handler",
            MetadataField::Override => "override",
        }
    }

    /// Environment variable overriding this field under `names`
    pub fn env_name(self, names: &EnvNames) -> &str {
        match self {
            MetadataField::Artifact => &names.artifact,
            MetadataField::Handler => &names.handler,
            MetadataField::Override => &names.language_override,
        }
    }
}

impl MetadataRecord {
    /// Whether every field is unset
    pub fn is_empty(&self) -> bool {
        self.artifact.is_empty() && self.handler.is_empty() && self.language_override.is_empty()
    }

    pub fn get(&self, field: MetadataField) -> &str {
        match field {
            MetadataField::Artifact => &self.artifact,
            MetadataField::Handler => &self.handler,
            MetadataField::Override => &self.language_override,
        }
    }

    fn get_mut(&mut self, field: MetadataField) -> &mut String {
        match field {
            MetadataField::Artifact => &mut self.artifact,
            MetadataField::Handler => &mut self.handler,
            MetadataField::Override => &mut self.language_override,
        }
    }
}

impl fmt::Display for MetadataRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Metadata{{ Artifact: {}, Handler: {}, Override: {} }}",
            self.artifact, self.handler, self.language_override
        )
    }
}

/// Where the file layer of a resolution came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataSource {
    /// metadata.toml was read from this path
    File(Utf8PathBuf),
    /// No metadata.toml in the application root
    Absent,
}

/// Where a single resolved field got its value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSource {
    /// Neither the file nor the environment supplied a value
    Unset,
    /// Value from metadata.toml
    File,
    /// Value from the named environment variable
    Environment(String),
}

impl fmt::Display for FieldSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldSource::Unset => f.write_str("unset"),
            FieldSource::File => f.write_str(crate::toml::METADATA_FILE_NAME),
            FieldSource::Environment(name) => write!(f, "${}", name),
        }
    }
}

/// Per-field origin of a resolved record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    pub artifact: FieldSource,
    pub handler: FieldSource,
    pub language_override: FieldSource,
}

impl Provenance {
    fn from_file(metadata: &MetadataRecord) -> Self {
        let source = |value: &str| {
            if value.is_empty() {
                FieldSource::Unset
            } else {
                FieldSource::File
            }
        };

        Self {
            artifact: source(&metadata.artifact),
            handler: source(&metadata.handler),
            language_override: source(&metadata.language_override),
        }
    }

    pub fn get(&self, field: MetadataField) -> &FieldSource {
        match field {
            MetadataField::Artifact => &self.artifact,
            MetadataField::Handler => &self.handler,
            MetadataField::Override => &self.language_override,
        }
    }

    fn set(&mut self, field: MetadataField, source: FieldSource) {
        match field {
            MetadataField::Artifact => self.artifact = source,
            MetadataField::Handler => self.handler = source,
            MetadataField::Override => self.language_override = source,
        }
    }
}

/// Outcome of a successful resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub metadata: MetadataRecord,
    pub source: MetadataSource,
    pub provenance: Provenance,
}

impl Resolution {
    /// Whether metadata.toml existed in the application root
    pub fn file_present(&self) -> bool {
        matches!(self.source, MetadataSource::File(_))
    }

    pub fn into_parts(self) -> (MetadataRecord, MetadataSource) {
        (self.metadata, self.source)
    }
}

/// Resolves function metadata from metadata.toml and the environment
#[derive(Debug, Clone, Default)]
pub struct MetadataResolver {
    env_names: EnvNames,
}

impl MetadataResolver {
    /// Create a resolver reading overrides from the variables in `env_names`
    pub fn new(env_names: EnvNames) -> Self {
        Self { env_names }
    }

    pub fn env_names(&self) -> &EnvNames {
        &self.env_names
    }

    /// Resolve metadata for `application`
    pub fn resolve_application<E: EnvSource + ?Sized>(
        &self,
        application: &Application,
        env: &E,
    ) -> ConfigResult<Resolution> {
        self.resolve(application.root(), env)
    }

    /// Resolve metadata for the application rooted at `root`
    ///
    /// A missing metadata.toml is not an error and yields an empty record
    /// before the environment is applied. Failing to read an existing file,
    /// or failing to decode it, aborts resolution.
    pub fn resolve<E: EnvSource + ?Sized>(
        &self,
        root: &Utf8Path,
        env: &E,
    ) -> ConfigResult<Resolution> {
        let path = metadata_path(root);

        let (mut metadata, source) = match load_from_file(&path)? {
            Some(metadata) => (metadata, MetadataSource::File(path)),
            None => (MetadataRecord::default(), MetadataSource::Absent),
        };
        let mut provenance = Provenance::from_file(&metadata);

        // Environment overrides metadata.toml values
        for field in MetadataField::ALL {
            let name = field.env_name(&self.env_names);
            if let Some(value) = non_empty(env, name) {
                trace!("{} overridden by ${}", field.key(), name);
                *metadata.get_mut(field) = value;
                provenance.set(field, FieldSource::Environment(name.to_string()));
            }
        }

        debug!("metadata: {} (source: {:?})", metadata, source);

        Ok(Resolution {
            metadata,
            source,
            provenance,
        })
    }
}
