//! Rule file loading
//!
//! Rule sets are plain data. TOML is the canonical format; YAML and JSON are
//! accepted with the same structure.

use crate::error::LoadError;
use crate::table::RuleSet;
use serde::de::DeserializeOwned;
use std::path::Path;

const BUILTIN_RULES: &str = include_str!("../rules/builtin.toml");

/// Serialization format of a rule or schema file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `.toml`
    Toml,
    /// `.yaml` / `.yml`
    Yaml,
    /// `.json`
    Json,
}

impl Format {
    /// Detect format from file extension
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Some(Self::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Some(Self::Yaml)
            }
            Some(ext) if ext.eq_ignore_ascii_case("json") => Some(Self::Json),
            _ => None,
        }
    }

    /// Parse a document in this format
    ///
    /// # Errors
    /// Returns the format's parse error
    pub fn parse<T: DeserializeOwned>(self, content: &str) -> Result<T, LoadError> {
        Ok(match self {
            Self::Toml => toml::from_str(content)?,
            Self::Yaml => serde_yaml::from_str(content)?,
            Self::Json => serde_json::from_str(content)?,
        })
    }
}

/// Read and parse a file, choosing the format from its extension
///
/// # Errors
/// - `LoadError::UnsupportedFormat` for unknown extensions
/// - `LoadError::Io` if the file cannot be read
/// - the format's parse error
pub fn load_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, LoadError> {
    let path = path.as_ref();
    let format =
        Format::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat(path.to_path_buf()))?;
    let content = std::fs::read_to_string(path).map_err(|e| LoadError::io_error(path, e))?;
    tracing::debug!(path = %path.display(), ?format, "loading rule file");
    format.parse(&content)
}

impl RuleSet {
    /// Rules shipped with the crate
    ///
    /// # Errors
    /// Returns error if the embedded table does not parse
    pub fn builtin() -> Result<Self, LoadError> {
        Self::from_toml_str(BUILTIN_RULES)
    }

    /// Parse from TOML string
    ///
    /// # Errors
    /// Returns error if TOML is invalid
    pub fn from_toml_str(toml: &str) -> Result<Self, LoadError> {
        Format::Toml.parse(toml)
    }

    /// Parse from YAML string
    ///
    /// # Errors
    /// Returns error if YAML is invalid
    pub fn from_yaml_str(yaml: &str) -> Result<Self, LoadError> {
        Format::Yaml.parse(yaml)
    }

    /// Parse from JSON string
    ///
    /// # Errors
    /// Returns error if JSON is invalid
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        Format::Json.parse(json)
    }

    /// Read from file (`.toml`, `.yaml`, `.yml`, `.json`)
    ///
    /// # Errors
    /// See [`load_file`]
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        load_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compat_version::CompatibilityVersion;
    use std::io::Write;

    #[test]
    fn test_builtin_parses_and_validates() {
        let set = RuleSet::builtin().unwrap();
        assert!(!set.is_empty());

        let table = set.validate().unwrap();
        assert_eq!(table.rename_rules("GhostCellsGenerator")[0].modern, "GhostCells");
        assert_eq!(table.property_rules("AxisAlignedReflectionFilter").len(), 2);
        assert_eq!(table.identifier_rules("palette").len(), 1);
    }

    #[test]
    fn test_yaml_rules() {
        let set = RuleSet::from_yaml_str(
            r#"
rename:
  - legacy: OldSource
    modern: NewSource
    through: "5.9"
identifier:
  - category: palette
    threshold: "5.10"
    from: A
    to: B
"#,
        )
        .unwrap();

        assert_eq!(set.renames.len(), 1);
        assert_eq!(set.identifiers[0].threshold, CompatibilityVersion::new(5, 10));
    }

    #[test]
    fn test_json_rules() {
        let set = RuleSet::from_json_str(
            r#"{"rename": [{"legacy": "A", "modern": "B", "introduced_in": "5.0", "removed_in": "5.4"}]}"#,
        )
        .unwrap();
        assert!(set.renames[0].range.contains(CompatibilityVersion::new(5, 3)));
    }

    #[test]
    fn test_unknown_section_rejected() {
        let result = RuleSet::from_toml_str("[[renames]]\nlegacy = \"A\"");
        assert!(matches!(result, Err(LoadError::Toml(_))));
    }

    #[test]
    fn test_from_path_detects_format() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[[rename]]\nlegacy = \"A\"\nmodern = \"B\"\nthrough = \"5.2\""
        )
        .unwrap();

        let set = RuleSet::from_path(file.path()).unwrap();
        assert_eq!(set.renames[0].modern, "B");
    }

    #[test]
    fn test_from_path_rejects_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
        assert!(matches!(
            RuleSet::from_path(file.path()),
            Err(LoadError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_from_path_missing_file() {
        assert!(matches!(
            RuleSet::from_path("/nonexistent/rules.toml"),
            Err(LoadError::Io { .. })
        ));
    }
}
