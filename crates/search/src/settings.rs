//! Search settings via `omnisearch.toml`
//!
//! Every key is optional; a missing file section or key falls back to the
//! built-in default. A commented default file can be written on first run.

use crate::resolver::ValidationPolicy;
use omnisearch_core::{Error, Result, DEFAULT_ICON, DEFAULT_RESULT_LIMIT};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings file name
pub const SETTINGS_FILE_NAME: &str = "omnisearch.toml";

/// Shortest trimmed query, in characters, that triggers a search
pub const DEFAULT_MIN_QUERY_LEN: usize = 2;

/// Tunables of the search core
///
/// # Example
///
/// ```toml
/// min_query_len = 2
/// default_limit = 5
/// default_icon = "fa-file"
/// validation = "root-only"
/// parallel = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Queries shorter than this (after trimming) return no groups
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
    /// Result cap for configurations without one
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    /// Icon for configurations without one
    #[serde(default = "default_icon")]
    pub default_icon: String,
    /// Field path validation depth
    #[serde(default)]
    pub validation: ValidationPolicy,
    /// Query entity types concurrently
    #[serde(default)]
    pub parallel: bool,
}

fn default_min_query_len() -> usize {
    DEFAULT_MIN_QUERY_LEN
}

fn default_limit() -> usize {
    DEFAULT_RESULT_LIMIT
}

fn default_icon() -> String {
    DEFAULT_ICON.to_string()
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings {
            min_query_len: default_min_query_len(),
            default_limit: default_limit(),
            default_icon: default_icon(),
            validation: ValidationPolicy::default(),
            parallel: false,
        }
    }
}

impl SearchSettings {
    /// Returns the default settings file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# omnisearch settings
#
# Queries shorter than this many characters (after trimming) return nothing.
min_query_len = 2

# Per entity type result cap when a configuration does not set one.
default_limit = 5

# Icon shown for configurations that do not name one.
default_icon = "fa-file"

# Field path validation on configuration writes:
#   "root-only" = check the first segment only (default)
#   "full-path" = check every segment, following relations
validation = "root-only"

# Query entity types concurrently. Output order is unaffected.
parallel = false
"#
    }

    /// Check values that serde cannot
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if `default_limit` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.default_limit == 0 {
            return Err(Error::config("default_limit must be positive"));
        }
        Ok(())
    }

    /// Read and parse settings from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read settings file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let settings: SearchSettings = toml::from_str(&content).map_err(|e| {
            Error::config(format!(
                "Failed to parse settings file '{}': {}",
                path.display(),
                e
            ))
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Write the default settings file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml())?;
        }
        Ok(())
    }

    /// Serialize these settings to TOML and write them to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::config(format!("Failed to serialize settings: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_settings() {
        let settings = SearchSettings::default();
        assert_eq!(settings.min_query_len, 2);
        assert_eq!(settings.default_limit, 5);
        assert_eq!(settings.default_icon, "fa-file");
        assert_eq!(settings.validation, ValidationPolicy::RootOnly);
        assert!(!settings.parallel);
    }

    #[test]
    fn default_toml_parses_to_defaults() {
        let parsed: SearchSettings = toml::from_str(SearchSettings::default_toml()).unwrap();
        assert_eq!(parsed, SearchSettings::default());
    }

    #[test]
    fn empty_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        std::fs::write(&path, "").unwrap();

        let settings = SearchSettings::from_file(&path).unwrap();
        assert_eq!(settings, SearchSettings::default());
    }

    #[test]
    fn partial_file_overrides_only_given_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        std::fs::write(&path, "validation = \"full-path\"\nparallel = true\n").unwrap();

        let settings = SearchSettings::from_file(&path).unwrap();
        assert_eq!(settings.validation, ValidationPolicy::FullPath);
        assert!(settings.parallel);
        assert_eq!(settings.default_limit, 5);
    }

    #[test]
    fn zero_default_limit_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        std::fs::write(&path, "default_limit = 0\n").unwrap();

        assert!(matches!(
            SearchSettings::from_file(&path),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn unknown_policy_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        std::fs::write(&path, "validation = \"deep\"\n").unwrap();

        let err = SearchSettings::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn write_default_does_not_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        std::fs::write(&path, "min_query_len = 3\n").unwrap();

        SearchSettings::write_default_if_missing(&path).unwrap();

        let settings = SearchSettings::from_file(&path).unwrap();
        assert_eq!(settings.min_query_len, 3);
    }

    #[test]
    fn write_to_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        let settings = SearchSettings {
            min_query_len: 3,
            default_limit: 8,
            default_icon: "fa-search".to_string(),
            validation: ValidationPolicy::FullPath,
            parallel: true,
        };

        settings.write_to_file(&path).unwrap();
        assert_eq!(SearchSettings::from_file(&path).unwrap(), settings);
    }
}
