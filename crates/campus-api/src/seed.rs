//! Startup data for the store.
//!
//! The store starts from either the built-in records or a JSON seed file of
//! the form `{"students": [...], "courses": [...]}`.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CampusError, Result};
use crate::model::{Course, Student};
use crate::validation;

/// Initial contents of both collections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedData {
    /// Students, in list order.
    #[serde(default)]
    pub students: Vec<Student>,
    /// Courses, in list order.
    #[serde(default)]
    pub courses: Vec<Course>,
}

impl SeedData {
    /// The records the service ships with.
    ///
    /// Student `670610720` lists course `261207`, which is not seeded, so a
    /// fresh store already carries one dangling reference.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            students: vec![
                Student {
                    student_id: "670610720".to_string(),
                    first_name: "Phavit".to_string(),
                    last_name: "Wongdao".to_string(),
                    program: "CPE".to_string(),
                    section: "001".to_string(),
                    courses: vec![261_207, 261_208],
                },
                Student {
                    student_id: "650610001".to_string(),
                    first_name: "Matt".to_string(),
                    last_name: "Damon".to_string(),
                    program: "CPE".to_string(),
                    section: "801".to_string(),
                    courses: vec![261_497],
                },
            ],
            courses: vec![
                Course::new(261_208, "Basic Computer Engineering Lab"),
                Course::new(261_497, "Full Stack Development"),
            ],
        }
    }

    /// Reads seed data from a JSON file and validates it.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CampusError::seed_parse(path, format!("failed to read file: {e}")))?;
        let seed: Self = serde_json::from_str(&contents)
            .map_err(|e| CampusError::seed_parse(path, e.to_string()))?;
        seed.validate()?;
        Ok(seed)
    }

    /// Checks primary-key uniqueness and student id format.
    pub fn validate(&self) -> Result<()> {
        let mut student_ids = HashSet::new();
        for student in &self.students {
            validation::student_id(&student.student_id).map_err(|rejection| {
                CampusError::seed(format!(
                    "student '{}': {}",
                    student.student_id,
                    rejection.message()
                ))
            })?;
            if !student_ids.insert(student.student_id.as_str()) {
                return Err(CampusError::seed(format!(
                    "duplicate student id '{}'",
                    student.student_id
                )));
            }
        }

        let mut course_ids = HashSet::new();
        for course in &self.courses {
            if !course_ids.insert(course.course_id) {
                return Err(CampusError::seed(format!(
                    "duplicate course id {}",
                    course.course_id
                )));
            }
        }

        Ok(())
    }
}
