//! Error types for the Campus API.
//!
//! This module defines the error hierarchy for configuration loading, seed
//! data loading, and store operations. HTTP-facing errors live in
//! [`crate::api::ApiError`], which converts from [`CampusError`].

use std::path::PathBuf;

/// A specialized `Result` type for Campus API operations.
pub type Result<T> = std::result::Result<T, CampusError>;

/// Errors that can occur while configuring or operating the Campus API.
#[derive(Debug, thiserror::Error)]
pub enum CampusError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid JSON syntax in configuration file.
    #[error("Invalid JSON in config file '{path}': {message}\n\nSuggestion: Validate your campus.json with a JSON linter")]
    ConfigParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Description of the parse error.
        message: String,
    },

    /// Configuration validation failed.
    #[error("Invalid configuration: {message}\n\nSuggestion: {suggestion}")]
    ConfigValidationError {
        /// Description of the validation failure.
        message: String,
        /// Actionable suggestion for the user.
        suggestion: String,
    },

    // ========================================================================
    // Seed Data Errors
    // ========================================================================
    /// Seed file could not be read or parsed.
    #[error("Invalid seed file '{path}': {message}\n\nSuggestion: The seed file must be a JSON object with 'students' and 'courses' arrays")]
    SeedParseError {
        /// Path to the seed file.
        path: PathBuf,
        /// Description of the failure.
        message: String,
    },

    /// Seed data parsed but violates a collection invariant.
    #[error("Invalid seed data: {message}")]
    SeedError {
        /// Description of the violated invariant.
        message: String,
    },

    // ========================================================================
    // Store Errors
    // ========================================================================
    /// No course with the given id exists.
    #[error("Course does not exist: {course_id}")]
    CourseNotFound {
        /// The id that was looked up.
        course_id: u32,
    },

    /// No student with the given id exists.
    #[error("Student does not exist: {student_id}")]
    StudentNotFound {
        /// The id that was looked up.
        student_id: String,
    },

    /// A course with the given id is already stored.
    #[error("Course Id already exists: {course_id}")]
    DuplicateCourse {
        /// The conflicting id.
        course_id: u32,
    },
}

impl CampusError {
    /// Creates a new `ConfigParseError` with the given path and message.
    #[must_use]
    pub fn config_parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ConfigParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new `ConfigValidationError` with the given message and suggestion.
    #[must_use]
    pub fn config_validation(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::ConfigValidationError {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Creates a new `SeedParseError`.
    #[must_use]
    pub fn seed_parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::SeedParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new `SeedError`.
    #[must_use]
    pub fn seed(message: impl Into<String>) -> Self {
        Self::SeedError {
            message: message.into(),
        }
    }

    /// Creates a new `StudentNotFound` error.
    #[must_use]
    pub fn student_not_found(student_id: impl Into<String>) -> Self {
        Self::StudentNotFound {
            student_id: student_id.into(),
        }
    }
}
