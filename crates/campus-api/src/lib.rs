//! Campus API
//!
//! REST API over in-memory student and course collections: validated course
//! CRUD, read-only students, and resolution of a student's enrolled courses.

pub mod api;
pub mod config;
mod courses;
pub mod error;
pub mod model;
pub mod seed;
pub mod store;
mod students;
pub mod validation;

#[cfg(test)]
mod testing;

pub use api::{
    course_link, create_router, student_link, ApiError, ApiResponse, AppState, Linked,
    ServiceInfo, INTERNAL_FAULT, VALIDATION_FAILED,
};
pub use config::{Config, Identity};
pub use error::{CampusError, Result};
pub use model::{Course, CourseKey, CourseSummary, CourseUpdate, Student, StudentCourses};
pub use seed::SeedData;
pub use store::Store;
pub use validation::Rejection;
