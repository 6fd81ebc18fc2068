//! Request validation.
//!
//! Each function checks one request shape and either returns a typed value
//! or a [`Rejection`] carrying the message of the first rule that failed.
//! Rules are checked in a fixed order and validation stops at the first
//! failure, so a request with several problems still yields one message.
//!
//! | Schema | Function |
//! |---|---|
//! | CourseId (path) | [`course_id`] |
//! | StudentId (path) | [`student_id`] |
//! | CoursePostBody | [`course_post_body`] |
//! | CoursePutBody | [`course_put_body`] |
//! | CourseDeleteBody | [`course_delete_body`] |
//!
//! Primary-key uniqueness is not a validation rule; it is enforced by the
//! store.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::model::{Course, CourseKey, CourseUpdate};

/// Number of digits in a student id.
pub const STUDENT_ID_LENGTH: usize = 9;

const COURSE_ID: &str = "courseId";
const COURSE_TITLE: &str = "courseTitle";

/// A failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct Rejection {
    message: String,
}

impl Rejection {
    /// Creates a rejection with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The description of the violated rule.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Consumes the rejection, returning its message.
    #[must_use]
    pub fn into_message(self) -> String {
        self.message
    }
}

/// Result of a validation step.
pub type Validated<T> = std::result::Result<T, Rejection>;

// ============================================================================
// Path parameters
// ============================================================================

/// Validates a course id path parameter.
///
/// Surrounding whitespace is ignored.
///
/// # Examples
///
/// ```
/// use campus_api::validation;
///
/// assert_eq!(validation::course_id("261207").ok(), Some(261_207));
/// assert!(validation::course_id("-1").is_err());
/// assert!(validation::course_id("abc").is_err());
/// ```
pub fn course_id(raw: &str) -> Validated<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Rejection::new("Course Id must be a non-negative integer"));
    }
    trimmed
        .parse()
        .map_err(|_| Rejection::new("Course Id is out of range"))
}

/// Validates a student id path parameter.
///
/// # Examples
///
/// ```
/// use campus_api::validation;
///
/// assert!(validation::student_id("670610720").is_ok());
/// assert!(validation::student_id("67061072").is_err());
/// ```
pub fn student_id(raw: &str) -> Validated<String> {
    if raw.is_empty() {
        return Err(Rejection::new("Student Id is required"));
    }
    if raw.len() != STUDENT_ID_LENGTH || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Rejection::new(format!(
            "Student Id must contain exactly {STUDENT_ID_LENGTH} digits"
        )));
    }
    Ok(raw.to_string())
}

// ============================================================================
// Request bodies
// ============================================================================

/// Validates the body of a course creation request.
pub fn course_post_body(body: &Value) -> Validated<Course> {
    let object = as_object(body)?;
    let course_id = required_course_id(object)?;
    let course_title = match object.get(COURSE_TITLE) {
        None => return Err(Rejection::new("courseTitle is required")),
        Some(value) => non_empty_title(value)?,
    };
    let details = descriptive_fields(object)?;

    Ok(Course {
        course_id,
        course_title,
        details,
    })
}

/// Validates the body of a course update request.
///
/// Only `courseId` is required; every other field is optional and, when
/// present, must satisfy the same rules as on creation.
pub fn course_put_body(body: &Value) -> Validated<CourseUpdate> {
    let object = as_object(body)?;
    let course_id = required_course_id(object)?;
    let course_title = object.get(COURSE_TITLE).map(non_empty_title).transpose()?;
    let details = descriptive_fields(object)?;

    Ok(CourseUpdate {
        course_id,
        course_title,
        details,
    })
}

/// Validates the body of a course deletion request.
///
/// Fields other than `courseId` are ignored.
pub fn course_delete_body(body: &Value) -> Validated<CourseKey> {
    let object = as_object(body)?;
    let course_id = required_course_id(object)?;
    Ok(CourseKey { course_id })
}

// ============================================================================
// Rules
// ============================================================================

fn as_object(body: &Value) -> Validated<&Map<String, Value>> {
    body.as_object()
        .ok_or_else(|| Rejection::new("Request body must be a JSON object"))
}

fn required_course_id(object: &Map<String, Value>) -> Validated<u32> {
    let value = object
        .get(COURSE_ID)
        .ok_or_else(|| Rejection::new("courseId is required"))?;
    let id = value
        .as_u64()
        .ok_or_else(|| Rejection::new("courseId must be a non-negative integer"))?;
    u32::try_from(id).map_err(|_| Rejection::new("courseId is out of range"))
}

fn non_empty_title(value: &Value) -> Validated<String> {
    let title = value
        .as_str()
        .ok_or_else(|| Rejection::new("courseTitle must be a string"))?;
    if title.trim().is_empty() {
        return Err(Rejection::new("courseTitle must not be empty"));
    }
    Ok(title.to_string())
}

/// Collects every field other than the id and title; each must be a string.
fn descriptive_fields(object: &Map<String, Value>) -> Validated<BTreeMap<String, String>> {
    object
        .iter()
        .filter(|(key, _)| key.as_str() != COURSE_ID && key.as_str() != COURSE_TITLE)
        .map(|(key, value)| {
            value
                .as_str()
                .map(|s| (key.clone(), s.to_string()))
                .ok_or_else(|| Rejection::new(format!("{key} must be a string")))
        })
        .collect()
}
