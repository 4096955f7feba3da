//! Configuration errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::validator::ValidationError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Cannot read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Variable ${{{0}}} is referenced but not set")]
    UnsetVariable(String),

    #[error("Invalid variable pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Validation found at least one error.
    #[error("Invalid configuration: {}", join_errors(.0))]
    Rejected(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
