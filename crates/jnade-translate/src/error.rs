//! Errors surfaced by the translation engine.
//!
//! Translation itself never fails: constructs it cannot render degrade to
//! raw text or are omitted. Only an unparsable input or an unreadable
//! configuration is reported.

use std::path::PathBuf;

use jnade_parser::ParseError;

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("source has {} syntax error(s)", .0.len())]
    Parse(Vec<ParseError>),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("indent unit must not be empty")]
    EmptyIndentUnit,
}
