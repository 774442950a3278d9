//! Core error and validation types.

use thiserror::Error;

/// Core operation result type.
pub type CoreResult<T> = Result<T, CoreError>;

/// Core error types.
///
/// Engine queries never produce these; they surface only when a product
/// definition is checked or (de)serialized.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Validation error.
    #[error("Validation error: {field}: {message}")]
    Validation {
        /// Field that failed validation.
        field: String,
        /// Validation error message.
        message: String,
    },

    /// Multiple validation errors.
    #[error("{} validation errors: {}", .0.len(), join_errors(.0))]
    MultipleValidationErrors(Vec<ValidationError>),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization error.
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            CoreError::Deserialization(err.to_string())
        } else {
            CoreError::Serialization(err.to_string())
        }
    }
}

/// A single validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Field that failed validation.
    pub field: String,
    /// Validation error message.
    pub message: String,
    /// Validation rule that was violated.
    pub rule: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: None,
        }
    }

    /// Creates a validation error with a rule name.
    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: Some(rule.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref rule) = self.rule {
            write!(f, "{}: {} (rule: {})", self.field, self.message, rule)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

/// Trait for validatable data.
pub trait Validate {
    /// Validates the value.
    ///
    /// Returns a list of validation errors, or an empty vector if valid.
    fn validate(&self) -> Vec<ValidationError>;

    /// Returns true if the value is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Validates and returns an error if invalid.
    fn validate_or_error(&self) -> CoreResult<()> {
        let mut errors = self.validate();
        match errors.len() {
            0 => Ok(()),
            1 => {
                let err = errors.remove(0);
                Err(CoreError::Validation {
                    field: err.field,
                    message: err.message,
                })
            }
            _ => Err(CoreError::MultipleValidationErrors(errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysInvalid(usize);

    impl Validate for AlwaysInvalid {
        fn validate(&self) -> Vec<ValidationError> {
            (0..self.0)
                .map(|i| ValidationError::new(format!("field{i}"), "bad"))
                .collect()
        }
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::with_rule("rules[0]", "targets itself", "no-self-target");
        assert_eq!(err.to_string(), "rules[0]: targets itself (rule: no-self-target)");
        assert_eq!(ValidationError::new("id", "empty").to_string(), "id: empty");
    }

    #[test]
    fn test_validate_or_error() {
        assert!(AlwaysInvalid(0).validate_or_error().is_ok());
        assert!(matches!(
            AlwaysInvalid(1).validate_or_error(),
            Err(CoreError::Validation { .. })
        ));
        match AlwaysInvalid(3).validate_or_error() {
            Err(CoreError::MultipleValidationErrors(errors)) => assert_eq!(errors.len(), 3),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
