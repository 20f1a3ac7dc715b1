#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! lspgen Configuration
//!
//! This crate provides configuration management for lspgen.
//! It handles loading, saving, and managing configuration files that specify:
//! - Logging configuration
//! - Code generation parameters (output location, category filter)
//!
//! Configuration is stored in TOML format and can be loaded from files or created
//! with sensible defaults for development and testing.

use std::path::{Path, PathBuf};

use ir::{MethodCategory, UnknownCategory};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    /// Failed to parse the TOML configuration file
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    /// Failed to serialize configuration to TOML format
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// Configuration file was not found at the specified path
    #[error("Config file not found at: {0}")]
    NotFound(PathBuf),
    /// Could not locate the user's configuration directory
    #[error("Could not find user config directory")]
    ConfigDirUnavailable,
    /// A category label in `codegen.categories` names no method category
    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategory),
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Code generation settings
    #[serde(default)]
    pub codegen: CodegenConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log file path (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

/// Code generation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodegenConfig {
    /// Where to write the descriptor document
    pub output_path: PathBuf,
    /// Categories to generate bindings for (all when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from a TOML file at `path`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load the configuration at the default path, falling back to defaults
    /// when no file exists there
    pub fn load_or_default() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save this configuration as a pretty-printed TOML file at `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Returns the default config file path:
    /// `{config_dir()}/lspgen/config.toml`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir =
            dirs::config_dir().ok_or(ConfigError::ConfigDirUnavailable)?.join("lspgen");
        Ok(config_dir.join("config.toml"))
    }
}

impl CodegenConfig {
    /// Parse the category filter
    ///
    /// Returns `None` when every category should be generated. Unknown labels
    /// are an error rather than being skipped.
    pub fn categories(&self) -> Result<Option<Vec<MethodCategory>>, ConfigError> {
        let Some(labels) = &self.categories else {
            return Ok(None);
        };
        let categories = labels
            .iter()
            .map(|label| label.parse::<MethodCategory>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(categories))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self { Self { level: "info".to_string(), file: None } }
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self { output_path: PathBuf::from("generated/methods.json"), categories: None }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_from_file() {
        // Test successful loading with explicit TOML content
        let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
        let toml_content = r#"
            [logging]
            level = "info"

            [codegen]
            output_path = "generated/methods.json"
        "#;
        fs::write(&temp_file, toml_content)
            .expect("Failed to write TOML content to temporary file");

        let loaded_config =
            Config::from_file(&temp_file).expect("Failed to load config from temporary file");
        assert_eq!(loaded_config.logging.level, "info");
        assert_eq!(loaded_config.logging.file, None);
        assert_eq!(loaded_config.codegen.output_path, PathBuf::from("generated/methods.json"));
        assert_eq!(loaded_config.codegen.categories, None);

        // Test successful parsing with different content
        let temp_file2 = NamedTempFile::new().expect("Failed to create second temporary file");
        let toml_content2 = r#"
            [logging]
            level = "debug"
            file = "lspgen.log"

            [codegen]
            output_path = "out/descriptors.json"
            categories = ["General", "textDocument"]
        "#;
        fs::write(&temp_file2, toml_content2)
            .expect("Failed to write second TOML content to temporary file");

        let loaded_config2 = Config::from_file(&temp_file2)
            .expect("Failed to load second config from temporary file");
        assert_eq!(loaded_config2.logging.level, "debug");
        assert_eq!(loaded_config2.logging.file, Some(PathBuf::from("lspgen.log")));
        assert_eq!(loaded_config2.codegen.output_path, PathBuf::from("out/descriptors.json"));
        assert_eq!(
            loaded_config2.codegen.categories().expect("Categories should parse"),
            Some(vec![MethodCategory::General, MethodCategory::TextDocument])
        );

        // Test file not found error
        let result = Config::from_file("nonexistent_file.toml");
        assert!(result.is_err());
        match result.expect_err("Expected error for nonexistent file") {
            ConfigError::FileRead(_) => {}
            _ => panic!("Expected FileRead error"),
        }

        // Test parse error
        let temp_file =
            NamedTempFile::new().expect("Failed to create temporary file for parse error test");
        fs::write(&temp_file, "invalid toml content")
            .expect("Failed to write invalid TOML content");

        let result = Config::from_file(&temp_file);
        assert!(result.is_err());
        match result.expect_err("Expected parse error for invalid TOML") {
            ConfigError::Parse(_) => {}
            _ => panic!("Expected Parse error"),
        }
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
        fs::write(&temp_file, "[logging]\nlevel = \"warn\"\n")
            .expect("Failed to write TOML content to temporary file");

        let config = Config::from_file(&temp_file).expect("Partial config should load");
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.codegen, CodegenConfig::default());
    }

    #[test]
    fn test_unknown_category() {
        let codegen = CodegenConfig {
            output_path: PathBuf::from("methods.json"),
            categories: Some(vec!["General".to_string(), "notebookDocument".to_string()]),
        };

        match codegen.categories() {
            Err(ConfigError::UnknownCategory(UnknownCategory(label))) => {
                assert_eq!(label, "notebookDocument")
            }
            other => panic!("Expected UnknownCategory error, got {:?}", other),
        }
    }

    #[test]
    fn test_save() {
        let mut config = Config::default();
        config.codegen.categories = Some(vec!["TextDocument".to_string()]);
        let temp_file =
            NamedTempFile::new().expect("Failed to create temporary file for save test");

        // Test successful save
        let result = config.save(&temp_file);
        assert!(result.is_ok());

        // Verify the file was written and can be read back
        let contents = fs::read_to_string(&temp_file).expect("Failed to read saved config file");
        assert!(contents.contains("info"));
        assert!(contents.contains("generated/methods.json"));
        assert!(contents.contains("TextDocument"));
        let reloaded = Config::from_file(&temp_file).expect("Saved config should load");
        assert_eq!(reloaded, config);

        // Test file write error - try to save to a non-existent directory
        let temp_dir = tempfile::tempdir().expect("Failed to create temporary directory");
        let non_existent_subdir = temp_dir.path().join("nonexistent").join("config.toml");

        let result = config.save(&non_existent_subdir);
        assert!(result.is_err());

        // Verify the error is a FileRead error (from std::fs::write)
        match result.expect_err("Expected file write error for non-existent directory") {
            ConfigError::FileRead(_) => (), // Expected
            other => panic!("Expected FileRead error, got {:?}", other),
        }
    }

    #[test]
    fn test_default_path() {
        let path = Config::default_path().expect("Failed to get default config path");
        assert!(path.to_str().expect("Path should be valid UTF-8").ends_with("lspgen/config.toml"));
    }

    #[test]
    fn test_default() {
        let config = Config::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, None);
        assert_eq!(config.codegen.output_path, PathBuf::from("generated/methods.json"));
        assert_eq!(config.codegen.categories().expect("No filter"), None);
    }
}
