//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;
use velo_core::{CoreError, ValidationError};

/// Configuration operation result type.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// The file that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A product definition could not be parsed.
    #[error("Invalid product definition: {0}")]
    Product(String),

    /// A settings file could not be parsed.
    #[error("Invalid settings: {0}")]
    Settings(#[from] toml::de::Error),

    /// The product definition failed validation.
    #[error("Product definition failed validation: {}", join(.0))]
    Validation(Vec<ValidationError>),

    /// Strict mode rejected rules that reference unknown catalog entries.
    #[error("Product definition has dangling references: {}", .0.join("; "))]
    DanglingReferences(Vec<String>),

    /// No user data directory could be determined.
    #[error("Could not determine a data directory for the configuration store")]
    NoDataDir,
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<CoreError> for ConfigError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation { field, message } => {
                ConfigError::Validation(vec![ValidationError::new(field, message)])
            }
            CoreError::MultipleValidationErrors(errors) => ConfigError::Validation(errors),
            other => ConfigError::Product(other.to_string()),
        }
    }
}
