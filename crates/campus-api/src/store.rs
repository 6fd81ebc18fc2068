//! In-memory storage for the student and course collections.
//!
//! The store keeps both collections as ordered vectors. Lookups are linear
//! scans; insertion order is what list endpoints return. The store is not
//! synchronized itself: [`crate::api::AppState`] wraps it in a single mutex
//! that handlers hold for a whole request.

use crate::error::{CampusError, Result};
use crate::model::{Course, CourseSummary, CourseUpdate, Student};
use crate::seed::SeedData;

/// Owner of the student and course collections.
#[derive(Debug, Clone, Default)]
pub struct Store {
    students: Vec<Student>,
    courses: Vec<Course>,
}

impl Store {
    /// Creates a store from validated seed data.
    pub fn from_seed(seed: SeedData) -> Result<Self> {
        seed.validate()?;
        Ok(Self {
            students: seed.students,
            courses: seed.courses,
        })
    }

    /// Creates a store holding the built-in seed records.
    #[must_use]
    pub fn builtin() -> Self {
        let seed = SeedData::builtin();
        Self {
            students: seed.students,
            courses: seed.courses,
        }
    }

    // ------------------------------------------------------------------------
    // Students
    // ------------------------------------------------------------------------

    /// All students, in insertion order.
    #[must_use]
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// Looks up a student by id.
    pub fn student(&self, student_id: &str) -> Result<&Student> {
        self.students
            .iter()
            .find(|student| student.student_id == student_id)
            .ok_or_else(|| CampusError::student_not_found(student_id))
    }

    /// Resolves a student's course references against the course collection.
    ///
    /// The result follows course-collection order. References to courses
    /// that are not stored are skipped.
    pub fn enrolled_courses(&self, student_id: &str) -> Result<Vec<CourseSummary>> {
        let student = self.student(student_id)?;
        Ok(self
            .courses
            .iter()
            .filter(|course| student.is_enrolled_in(course.course_id))
            .map(Course::summary)
            .collect())
    }

    // ------------------------------------------------------------------------
    // Courses
    // ------------------------------------------------------------------------

    /// All courses, in insertion order.
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Looks up a course by id.
    pub fn course(&self, course_id: u32) -> Result<&Course> {
        self.course_position(course_id)
            .map(|index| &self.courses[index])
            .ok_or(CampusError::CourseNotFound { course_id })
    }

    /// Appends a new course.
    ///
    /// Fails with `DuplicateCourse` and leaves the collection unchanged if
    /// the id is already present.
    pub fn insert_course(&mut self, course: Course) -> Result<&Course> {
        if self.course_position(course.course_id).is_some() {
            return Err(CampusError::DuplicateCourse {
                course_id: course.course_id,
            });
        }
        self.courses.push(course);
        let index = self.courses.len() - 1;
        Ok(&self.courses[index])
    }

    /// Merges an update onto an existing course in place.
    pub fn update_course(&mut self, update: CourseUpdate) -> Result<&Course> {
        let course_id = update.course_id;
        let index = self
            .course_position(course_id)
            .ok_or(CampusError::CourseNotFound { course_id })?;
        self.courses[index].apply(update);
        Ok(&self.courses[index])
    }

    /// Removes a course and returns it.
    ///
    /// Student course references are left untouched.
    pub fn remove_course(&mut self, course_id: u32) -> Result<Course> {
        let index = self
            .course_position(course_id)
            .ok_or(CampusError::CourseNotFound { course_id })?;
        Ok(self.courses.remove(index))
    }

    fn course_position(&self, course_id: u32) -> Option<usize> {
        self.courses
            .iter()
            .position(|course| course.course_id == course_id)
    }
}
