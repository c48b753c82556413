//! Input integrity checks for timetable generation.
//!
//! Detects records the allocator cannot index safely:
//! - Missing (empty) IDs
//! - Duplicate IDs within one entity kind
//!
//! References from sections to subjects that do not exist are not errors;
//! [`unknown_subject_refs`] lists them so callers can report them.

use std::collections::HashSet;

use thiserror::Error;

use crate::models::{Classroom, Faculty, Section, Subject};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A record has an empty ID.
    MissingId,
    /// Two records of the same kind share an ID.
    DuplicateId,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates allocation input.
///
/// Checks, per entity kind (section, subject, faculty, classroom):
/// 1. Every record has a non-empty ID
/// 2. No two records share an ID
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    sections: &[Section],
    subjects: &[Subject],
    faculty: &[Faculty],
    classrooms: &[Classroom],
) -> ValidationResult {
    let mut errors = Vec::new();

    check_ids("Section", sections.iter().map(|s| s.id.as_str()), &mut errors);
    check_ids("Subject", subjects.iter().map(|s| s.id.as_str()), &mut errors);
    check_ids("Faculty", faculty.iter().map(|f| f.id.as_str()), &mut errors);
    check_ids("Classroom", classrooms.iter().map(|c| c.id.as_str()), &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_ids<'a>(
    label: &str,
    ids: impl Iterator<Item = &'a str>,
    errors: &mut Vec<ValidationError>,
) {
    let mut seen = HashSet::new();
    for (index, id) in ids.enumerate() {
        if id.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingId,
                format!("{label} at index {index} has no id"),
            ));
            continue;
        }
        if !seen.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate {} ID: {id}", label.to_lowercase()),
            ));
        }
    }
}

/// Lists `(section_id, subject_id)` pairs whose subject is not in `subjects`.
pub fn unknown_subject_refs<'a>(
    sections: &'a [Section],
    subjects: &[Subject],
) -> Vec<(&'a str, &'a str)> {
    let known: HashSet<&str> = subjects.iter().map(|s| s.id.as_str()).collect();
    sections
        .iter()
        .flat_map(|sec| {
            sec.subjects
                .iter()
                .filter(|id| !known.contains(id.as_str()))
                .map(move |id| (sec.id.as_str(), id.as_str()))
        })
        .collect()
}
