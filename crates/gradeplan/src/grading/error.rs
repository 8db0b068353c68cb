//! Error types for the grading engines.

use thiserror::Error;

/// Errors raised while validating course records or computing results.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GradingError {
    /// Grade letter is not part of the grade table
    #[error("Invalid grade '{grade}'. Allowed: {allowed}")]
    InvalidGrade { grade: String, allowed: String },

    /// The same course code appears twice in one GPA computation
    #[error("Duplicate course entry: {code}")]
    DuplicateCourse { code: String },

    /// Credit hours outside of (0, 10]
    #[error("Invalid credit hours for {code}: {credit_hours} (must be > 0 and <= 10)")]
    InvalidCreditHours { code: String, credit_hours: f64 },

    /// Target label is not a classification band
    #[error("Unknown target_class '{label}'. Choose one of: {allowed}")]
    UnknownTargetClass { label: String, allowed: String },

    /// A record field violates its length or range constraint
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// A semester failed to compute; wraps the underlying failure
    #[error("Semester '{term}': {source}")]
    InSemester {
        term: String,
        #[source]
        source: Box<GradingError>,
    },
}

impl GradingError {
    /// Returns the innermost error, unwrapping semester annotations.
    pub fn root(&self) -> &GradingError {
        match self {
            GradingError::InSemester { source, .. } => source.root(),
            other => other,
        }
    }

    /// Returns the semester term this error was raised in, if any.
    pub fn term(&self) -> Option<&str> {
        match self {
            GradingError::InSemester { term, .. } => Some(term),
            _ => None,
        }
    }

    pub(crate) fn in_semester(term: &str, source: GradingError) -> Self {
        GradingError::InSemester {
            term: term.to_string(),
            source: Box::new(source),
        }
    }
}
