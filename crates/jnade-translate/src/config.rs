//! Translator settings, optionally read from a `jnade.toml` file.
//!
//! ```toml
//! [translate]
//! indent_unit = "　"
//! comments = true
//! max_depth = 256
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Name of the configuration file looked up by the driver.
pub const CONFIG_FILE: &str = "jnade.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TranslateConfig {
    /// One indentation step. Default: the ideographic space.
    pub indent_unit: String,
    /// Whether comments are carried into the output. Default: true.
    pub comments: bool,
    /// Recursion budget of the expression and condition translators.
    pub max_depth: usize,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            indent_unit: "\u{3000}".to_string(),
            comments: true,
            max_depth: 256,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    translate: TranslateConfig,
}

impl TranslateConfig {
    /// Read the `[translate]` table of a configuration file.
    pub fn from_file(path: &Path) -> Result<TranslateConfig, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse the `[translate]` table from TOML text. Missing keys keep
    /// their defaults.
    pub fn from_toml(content: &str) -> Result<TranslateConfig, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        if file.translate.indent_unit.is_empty() {
            return Err(ConfigError::EmptyIndentUnit);
        }
        Ok(file.translate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = TranslateConfig::default();
        assert_eq!(config.indent_unit, "　");
        assert!(config.comments);
        assert_eq!(config.max_depth, 256);
    }

    #[test]
    fn partial_table_keeps_defaults() {
        let config = TranslateConfig::from_toml("[translate]\ncomments = false\n").unwrap();
        assert!(!config.comments);
        assert_eq!(config.indent_unit, "　");
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(
            TranslateConfig::from_toml("").unwrap(),
            TranslateConfig::default()
        );
    }

    #[test]
    fn rejects_empty_indent_unit() {
        let err = TranslateConfig::from_toml("[translate]\nindent_unit = \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::EmptyIndentUnit));
    }

    #[test]
    fn rejects_wrong_types() {
        let err = TranslateConfig::from_toml("[translate]\nmax_depth = \"deep\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[translate]\nindent_unit = \"  \"\n").unwrap();
        let config = TranslateConfig::from_file(&path).unwrap();
        assert_eq!(config.indent_unit, "  ");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TranslateConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("absent.toml"));
    }
}
