//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A `--select` argument is not of the form `category=value`.
    #[error("Invalid selection '{0}'. Use CATEGORY=VALUE.")]
    InvalidSelection(String),

    /// Unknown rule kind filter.
    #[error("Unknown rule kind '{0}'. Use compatibility or pricing.")]
    InvalidRuleKind(String),

    /// No saved configuration has the requested id.
    #[error("No configuration found for id {0}")]
    NotFound(String),

    /// A category filter names no catalog category.
    #[error("Unknown category '{0}'")]
    UnknownCategory(String),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
