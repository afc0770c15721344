//! metadata.toml decoding and serialization

use std::io;
use std::ops::Range;
use camino::{Utf8Path, Utf8PathBuf};
use fnpack_core::error::FnpackError;
use crate::{metadata::MetadataRecord, ConfigResult};

/// Name of the metadata file looked up directly inside an application root
pub const METADATA_FILE_NAME: &str = "metadata.toml";

/// Location of the metadata file for the application rooted at `root`
pub fn metadata_path(root: &Utf8Path) -> Utf8PathBuf {
    root.join(METADATA_FILE_NAME)
}

/// Parse metadata.toml content into a record
pub fn parse_metadata_toml(content: &str) -> ConfigResult<MetadataRecord> {
    parse_at(Utf8Path::new(METADATA_FILE_NAME), content)
}

/// Serialize a record back to metadata.toml form, omitting unset fields
pub fn serialize_metadata_toml(metadata: &MetadataRecord) -> ConfigResult<String> {
    ::toml::to_string(metadata).map_err(|e| FnpackError::ConfigValidation {
        field: "metadata".to_string(),
        reason: format!("TOML serialization error: {}", e),
    })
}

/// Read and parse the metadata file at `path`
///
/// Returns `Ok(None)` when the file does not exist. Any other failure to read
/// is a `FileAccess` error; content that is not UTF-8 or not valid TOML is a
/// `Decode` error.
pub fn load_from_file(path: &Utf8Path) -> ConfigResult<Option<MetadataRecord>> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(FnpackError::file_access(path.as_str(), e)),
    };

    let content = String::from_utf8(bytes).map_err(|e| {
        let offset = e.utf8_error().valid_up_to();
        let (line, column) = line_column(&String::from_utf8_lossy(e.as_bytes()), offset);
        FnpackError::Decode {
            path: path.to_string(),
            message: "file is not valid UTF-8".to_string(),
            line,
            column,
        }
    })?;

    parse_at(path, &content).map(Some)
}

fn parse_at(path: &Utf8Path, content: &str) -> ConfigResult<MetadataRecord> {
    // Syntax first for precise locations, then typed decode
    content
        .parse::<toml_edit::DocumentMut>()
        .map_err(|e| decode_error(path, content, e.message(), e.span()))?;

    ::toml::from_str(content).map_err(|e| decode_error(path, content, e.message(), e.span()))
}

fn decode_error(
    path: &Utf8Path,
    content: &str,
    message: &str,
    span: Option<Range<usize>>,
) -> FnpackError {
    let (line, column) = span
        .map(|span| line_column(content, span.start))
        .unwrap_or((0, 0));

    FnpackError::Decode {
        path: path.to_string(),
        message: message.trim().to_string(),
        line,
        column,
    }
}

/// 1-based line and column of byte `offset` in `content`
fn line_column(content: &str, offset: usize) -> (usize, usize) {
    let mut offset = offset.min(content.len());
    while !content.is_char_boundary(offset) {
        offset -= 1;
    }

    let before = &content[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn utf8_root(temp_dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap()
    }

    #[test]
    fn test_parse_all_fields() {
        let toml = r#"
artifact = "toml-artifact"
handler = "toml-handler"
override = "toml-override"
"#;

        let metadata = parse_metadata_toml(toml).unwrap();
        assert_eq!(metadata.artifact, "toml-artifact");
        assert_eq!(metadata.handler, "toml-handler");
        assert_eq!(metadata.language_override, "toml-override");
    }

    #[test]
    fn test_parse_missing_fields_default_to_empty() {
        let metadata = parse_metadata_toml("handler = \"com.example.Fn\"\n").unwrap();
        assert_eq!(metadata.artifact, "");
        assert_eq!(metadata.handler, "com.example.Fn");
        assert_eq!(metadata.language_override, "");

        assert!(parse_metadata_toml("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_ignores_unknown_keys() {
        let toml = r#"
artifact = "fn.jar"
invoker = "java"

[extra]
nested = true
"#;

        let metadata = parse_metadata_toml(toml).unwrap();
        assert_eq!(metadata.artifact, "fn.jar");
    }

    #[test]
    fn test_unterminated_string_is_decode_error() {
        let err = parse_metadata_toml("artifact = \"fn.jar\nhandler = \"h\"\n").unwrap_err();
        match err {
            FnpackError::Decode { path, line, column, .. } => {
                assert_eq!(path, METADATA_FILE_NAME);
                // Reported where the string breaks, at the end of line 1 or start of line 2
                assert!(line == 1 || line == 2, "unexpected location {}:{}", line, column);
            },
            other => panic!("Expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_type_is_decode_error() {
        let err = parse_metadata_toml("artifact = \"fn.jar\"\nhandler = 42\n").unwrap_err();
        match err {
            FnpackError::Decode { message, line, .. } => {
                assert!(message.contains("string"), "unexpected message: {}", message);
                assert_eq!(line, 2);
            },
            other => panic!("Expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_serialize_skips_empty_fields() {
        let metadata = MetadataRecord {
            artifact: "fn.jar".to_string(),
            handler: String::new(),
            language_override: "java".to_string(),
        };

        let serialized = serialize_metadata_toml(&metadata).unwrap();
        assert!(serialized.contains("artifact = \"fn.jar\""));
        assert!(serialized.contains("override = \"java\""));
        assert!(!serialized.contains("handler"));
        assert_eq!(parse_metadata_toml(&serialized).unwrap(), metadata);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = metadata_path(&utf8_root(&temp_dir));
        assert!(load_from_file(&path).unwrap().is_none());
    }

    #[test]
    fn test_load_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = metadata_path(&utf8_root(&temp_dir));
        std::fs::write(&path, "artifact = \"target/fn\"\n").unwrap();

        let metadata = load_from_file(&path).unwrap().unwrap();
        assert_eq!(metadata.artifact, "target/fn");
    }

    #[test]
    fn test_load_reports_full_path_on_decode_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = metadata_path(&utf8_root(&temp_dir));
        std::fs::write(&path, "artifact = [").unwrap();

        match load_from_file(&path).unwrap_err() {
            FnpackError::Decode { path: reported, .. } => assert_eq!(reported, path.as_str()),
            other => panic!("Expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_invalid_utf8_is_decode_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = metadata_path(&utf8_root(&temp_dir));
        std::fs::write(&path, b"artifact = \"\xff\"\n").unwrap();

        match load_from_file(&path).unwrap_err() {
            FnpackError::Decode { message, line, column, .. } => {
                assert_eq!(message, "file is not valid UTF-8");
                assert_eq!((line, column), (1, 13));
            },
            other => panic!("Expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_directory_is_file_access_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = metadata_path(&utf8_root(&temp_dir));
        std::fs::create_dir(&path).unwrap();

        assert!(load_from_file(&path).unwrap_err().is_file_access());
    }

    #[test]
    fn test_line_column() {
        assert_eq!(line_column("abc", 0), (1, 1));
        assert_eq!(line_column("abc\ndef", 5), (2, 2));
        assert_eq!(line_column("abc\n", 4), (2, 1));
        assert_eq!(line_column("é=1", 2), (1, 2));
        assert_eq!(line_column("ab", 99), (1, 3));
    }
}
