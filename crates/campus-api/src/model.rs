//! Record types for the student and course collections.
//!
//! All types serialize with camelCase field names, matching the JSON wire
//! format of the HTTP API and the seed file.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ============================================================================
// Course
// ============================================================================

/// A course record.
///
/// `course_id` is the primary key. Any descriptive fields beyond the title
/// are carried as opaque strings in `details` and flattened into the JSON
/// object on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Unique course identifier.
    pub course_id: u32,
    /// Human-readable course title.
    pub course_title: String,
    /// Additional descriptive fields, keyed by their JSON name.
    #[serde(flatten)]
    pub details: BTreeMap<String, String>,
}

impl Course {
    /// Creates a course with no additional details.
    #[must_use]
    pub fn new(course_id: u32, course_title: impl Into<String>) -> Self {
        Self {
            course_id,
            course_title: course_title.into(),
            details: BTreeMap::new(),
        }
    }

    /// Adds a descriptive field, replacing any previous value.
    #[must_use]
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Merges the fields present in `update` onto this record.
    ///
    /// Fields absent from the update keep their current values. The
    /// primary key is never changed.
    pub fn apply(&mut self, update: CourseUpdate) {
        if let Some(title) = update.course_title {
            self.course_title = title;
        }
        self.details.extend(update.details);
    }

    /// Projects this course to its id and title.
    #[must_use]
    pub fn summary(&self) -> CourseSummary {
        CourseSummary {
            course_id: self.course_id,
            course_title: self.course_title.clone(),
        }
    }
}

/// A validated partial update for an existing course.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseUpdate {
    /// Identifies the course to update.
    pub course_id: u32,
    /// New title, if supplied.
    pub course_title: Option<String>,
    /// Descriptive fields to set.
    pub details: BTreeMap<String, String>,
}

/// A validated reference to a course by primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseKey {
    /// The referenced course id.
    pub course_id: u32,
}

/// The `{courseId, courseTitle}` projection used by relation resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    /// Course identifier.
    pub course_id: u32,
    /// Course title.
    pub course_title: String,
}

// ============================================================================
// Student
// ============================================================================

/// A student record.
///
/// `courses` holds course ids by value. They are lookup keys only and may
/// refer to courses that no longer exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Unique student identifier.
    pub student_id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Degree program code.
    pub program: String,
    /// Section code.
    pub section: String,
    /// Ids of the courses this student is enrolled in.
    #[serde(default)]
    pub courses: Vec<u32>,
}

impl Student {
    /// Returns `true` if the student lists the given course id.
    #[must_use]
    pub fn is_enrolled_in(&self, course_id: u32) -> bool {
        self.courses.contains(&course_id)
    }
}

/// Response payload for a student's resolved courses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentCourses {
    /// The student the courses belong to.
    pub student_id: String,
    /// Resolved courses, in course-collection order.
    pub courses: Vec<CourseSummary>,
}
