//! Handlers for the course collection.
//!
//! Every handler validates its input before taking the store lock, then
//! holds the lock until the response value is built.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use serde_json::Value;
use tracing::{debug, info};

use crate::api::{course_link, json_body, path_param, ApiError, AppState, Linked};
use crate::model::Course;
use crate::validation;

/// Handler for `GET /courses`.
pub(crate) async fn list_courses(State(state): State<Arc<AppState>>) -> Json<Vec<Course>> {
    let store = state.store.lock().await;
    debug!(count = store.courses().len(), "Listing courses");
    Json(store.courses().to_vec())
}

/// Handler for `GET /courses/:course_id`.
pub(crate) async fn get_course(
    State(state): State<Arc<AppState>>,
    raw_id: Result<Path<String>, PathRejection>,
) -> Result<Linked<Course>, ApiError> {
    let course_id = validation::course_id(&path_param(raw_id)?)?;

    let store = state.store.lock().await;
    let course = store.course(course_id)?.clone();
    drop(store);

    debug!(course_id, "Course found");
    Ok(Linked::ok(
        course_link(course_id),
        format!("Get course {course_id}"),
        course,
    ))
}

/// Handler for `POST /courses`.
///
/// Rejects a duplicate `courseId` with 409 without touching the collection.
pub(crate) async fn create_course(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Linked<Course>, ApiError> {
    let course = validation::course_post_body(&json_body(payload)?)?;
    let course_id = course.course_id;

    let mut store = state.store.lock().await;
    let created = store.insert_course(course)?.clone();
    drop(store);

    info!(course_id, title = %created.course_title, "Course created");
    Ok(Linked::created(
        course_link(course_id),
        format!("Course {course_id} has been added successfully"),
        created,
    ))
}

/// Handler for `PUT /courses`.
///
/// Fields present in the body replace the stored values; absent fields
/// are kept.
pub(crate) async fn update_course(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Linked<Course>, ApiError> {
    let update = validation::course_put_body(&json_body(payload)?)?;
    let course_id = update.course_id;

    let mut store = state.store.lock().await;
    let updated = store.update_course(update)?.clone();
    drop(store);

    info!(course_id, "Course updated");
    Ok(Linked::ok(
        course_link(course_id),
        format!("Course {course_id} has been updated successfully"),
        updated,
    ))
}

/// Handler for `DELETE /courses`.
///
/// Students that list the removed course keep the reference.
pub(crate) async fn delete_course(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Linked<Course>, ApiError> {
    let key = validation::course_delete_body(&json_body(payload)?)?;
    let course_id = key.course_id;

    let mut store = state.store.lock().await;
    let removed = store.remove_course(course_id)?;
    drop(store);

    info!(course_id, "Course deleted");
    Ok(Linked::ok(
        course_link(course_id),
        format!("Course {course_id} has been deleted successfully"),
        removed,
    ))
}
