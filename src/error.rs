//! Error types for timetable generation.

use thiserror::Error;

use crate::validation::ValidationError;

/// Main error type for timetable operations.
#[derive(Debug, Error)]
pub enum TimetableError {
    /// Input records failed integrity checks.
    #[error("Invalid input: {} problem(s) found", .0.len())]
    InvalidInput(Vec<ValidationError>),

    /// A schedule entry record could not be decoded.
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// A collection required for generation is empty.
    #[error("Missing data: {0}")]
    MissingData(String),

    /// The allocation agent did not produce a timetable.
    #[error("Failed to generate timetable: {message}")]
    GenerationFailed { message: String, errors: Vec<String> },

    /// Lookup by id found nothing.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid configuration values.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal error (should not occur in normal operation).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TimetableError {
    /// Expands the error into one line per underlying problem.
    ///
    /// `InvalidInput` and `GenerationFailed` yield each underlying message;
    /// every other variant yields its display string.
    pub fn details(&self) -> Vec<String> {
        match self {
            Self::InvalidInput(errors) => errors.iter().map(|e| e.message.clone()).collect(),
            Self::GenerationFailed { errors, .. } if !errors.is_empty() => errors.clone(),
            other => vec![other.to_string()],
        }
    }
}

/// Result type alias for timetable operations.
pub type Result<T> = std::result::Result<T, TimetableError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_details_expands_validation_errors() {
        let err = TimetableError::InvalidInput(vec![
            ValidationError::new(ValidationErrorKind::MissingId, "Faculty at index 0 has no id"),
            ValidationError::new(ValidationErrorKind::DuplicateId, "Duplicate section ID: S1"),
        ]);
        assert_eq!(err.to_string(), "Invalid input: 2 problem(s) found");
        assert_eq!(
            err.details(),
            vec![
                "Faculty at index 0 has no id".to_string(),
                "Duplicate section ID: S1".to_string()
            ]
        );
    }

    #[test]
    fn test_details_single_message() {
        let err = TimetableError::NotFound("tt_2024_1_0".into());
        assert_eq!(err.details(), vec!["Not found: tt_2024_1_0".to_string()]);
    }
}
