//! Error types for the VitaPrev core

use thiserror::Error;

/// Failure to normalize a wire date into a calendar date
///
/// Callers of the derivation functions never see this: an unparsable date is
/// treated as "unknown" and rendered with a placeholder.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Empty date string")]
    Empty,

    #[error("Unrecognized date format: {0}")]
    UnrecognizedFormat(String),

    #[error("Date out of range: {0}")]
    OutOfRange(String),
}

/// Submission-time validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{label}: {message}")]
    Field {
        field: String,
        label: String,
        message: String,
    },

    #[error("Validation failed: {0}")]
    Rules(String),
}

impl ValidationError {
    /// Build a field error with its user-facing label
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        ValidationError::Field {
            field: field.to_string(),
            label: crate::validation::get_field_display_label(field).to_string(),
            message: message.into(),
        }
    }

    /// Name of the offending field, if the error is tied to one
    pub fn field_name(&self) -> Option<&str> {
        match self {
            ValidationError::Field { field, .. } => Some(field),
            ValidationError::Rules(_) => None,
        }
    }
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        // Surface one failing field so the form can point at it; the
        // alphabetically first keeps the choice stable across runs.
        let first = errors
            .field_errors()
            .into_iter()
            .min_by(|a, b| a.0.cmp(&b.0))
            .and_then(|(field, errs)| {
                errs.first().map(|e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    ValidationError::field(field.as_ref(), message)
                })
            });

        first.unwrap_or_else(|| ValidationError::Rules(errors.to_string()))
    }
}
