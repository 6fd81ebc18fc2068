//! Handlers for the student collection.
//!
//! Students are read-only over HTTP.

use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use tracing::debug;

use crate::api::{path_param, student_link, ApiError, AppState, Linked};
use crate::model::{Student, StudentCourses};
use crate::validation;

/// Handler for `GET /students`.
pub(crate) async fn list_students(State(state): State<Arc<AppState>>) -> Json<Vec<Student>> {
    let store = state.store.lock().await;
    debug!(count = store.students().len(), "Listing students");
    Json(store.students().to_vec())
}

/// Handler for `GET /students/:student_id`.
pub(crate) async fn get_student(
    State(state): State<Arc<AppState>>,
    raw_id: Result<Path<String>, PathRejection>,
) -> Result<Linked<Student>, ApiError> {
    let student_id = validation::student_id(&path_param(raw_id)?)?;

    let store = state.store.lock().await;
    let student = store.student(&student_id)?.clone();
    drop(store);

    Ok(Linked::ok(
        student_link(&student_id),
        format!("Get student {student_id}"),
        student,
    ))
}

/// Handler for `GET /students/:student_id/courses`.
///
/// Course references with no matching course are left out of the result.
pub(crate) async fn get_student_courses(
    State(state): State<Arc<AppState>>,
    raw_id: Result<Path<String>, PathRejection>,
) -> Result<Linked<StudentCourses>, ApiError> {
    let student_id = validation::student_id(&path_param(raw_id)?)?;

    let store = state.store.lock().await;
    let courses = store.enrolled_courses(&student_id)?;
    drop(store);

    debug!(student_id = %student_id, resolved = courses.len(), "Resolved student courses");
    Ok(Linked::ok(
        student_link(&student_id),
        format!("Get courses detail of student {student_id}"),
        StudentCourses {
            student_id,
            courses,
        },
    ))
}
