use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Rejected by validation
    #[error("Configuration error: {0}")]
    Invalid(String),
}

/// Extension configuration (JSON)
///
/// No options are recognised yet. Unknown keys are kept so they can be
/// reported instead of silently dropped.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExtensionConfig {
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ExtensionConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::trace!(config = ?config, "Parsed config file");
        config.warn_unknown_fields();
        Ok(config)
    }

    /// Parse configuration from a JSON document
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }

    /// Keys present in the file that no option consumed
    pub fn unknown_fields(&self) -> Vec<&str> {
        self.extra.keys().map(String::as_str).collect()
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        let unknown = self.unknown_fields();
        if !unknown.is_empty() {
            tracing::warn!(
                fields = %unknown.join(", "),
                "Unknown fields in config file (possible typos)"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_config_validates() {
        assert!(ExtensionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_parse_empty() {
        let config = ExtensionConfig::from_json("{}").unwrap();
        assert_eq!(config, ExtensionConfig::default());
        assert!(config.unknown_fields().is_empty());
    }

    #[test]
    fn test_parse_extra_fields() {
        let config = ExtensionConfig::from_json(r#"{ "field_name": "ts", "other": 1 }"#).unwrap();
        assert_eq!(config.unknown_fields(), vec!["field_name", "other"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(ExtensionConfig::from_json("[1, 2]").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "unused": true }}"#).unwrap();

        let config = ExtensionConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.unknown_fields(), vec!["unused"]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ExtensionConfig::load_from_file(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = ExtensionConfig::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
