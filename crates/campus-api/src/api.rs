//! HTTP API for the Campus service.
//!
//! This module assembles the router, defines the shared application state,
//! and owns the response envelope and error mapping used by every handler.
//!
//! # Endpoints
//!
//! Under the configured prefix (default `/api/v2`):
//!
//! - `GET /students` - List students
//! - `GET /students/:student_id` - Get one student
//! - `GET /students/:student_id/courses` - Resolve a student's courses
//! - `GET /courses` - List courses
//! - `GET /courses/:course_id` - Get one course
//! - `POST /courses` - Create a course
//! - `PUT /courses` - Merge fields into a course
//! - `DELETE /courses` - Remove a course
//!
//! Outside the prefix:
//!
//! - `GET /` - Service banner
//! - `GET /me` - Identity metadata
//!
//! # Example
//!
//! ```no_run
//! use campus_api::{create_router, AppState, Config};
//!
//! # async fn example() {
//! let state = AppState::new(Config::default());
//!
//! let router = create_router(state);
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await.unwrap();
//! axum::serve(listener, router).await.unwrap();
//! # }
//! ```

use std::any::Any;
use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, warn};

use crate::config::Identity;
use crate::validation::Rejection;
use crate::{courses, students, CampusError, Config, Store};

/// Message returned with every 400 response.
pub const VALIDATION_FAILED: &str = "Validation failed";

/// Message returned with every 500 response.
pub const INTERNAL_FAULT: &str = "Something is wrong, please try again";

// ============================================================================
// Response Envelope
// ============================================================================

/// The JSON wrapper returned by every endpoint except the list endpoints.
///
/// Absent members are omitted from the serialized object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded.
    pub success: bool,
    /// Human-readable summary.
    pub message: String,
    /// Payload of a successful request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Detail of an internal fault.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// First validation message of a rejected request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<String>,
}

impl<T> ApiResponse<T> {
    /// A successful envelope carrying `data`.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            error: None,
            errors: None,
        }
    }

    /// A failed envelope with only a message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            error: None,
            errors: None,
        }
    }
}

/// A successful envelope sent with a `Link` header naming the resource.
#[derive(Debug)]
pub struct Linked<T> {
    status: StatusCode,
    link: String,
    body: ApiResponse<T>,
}

impl<T> Linked<T> {
    /// A `200 OK` response.
    pub fn ok(link: impl Into<String>, message: impl Into<String>, data: T) -> Self {
        Self {
            status: StatusCode::OK,
            link: link.into(),
            body: ApiResponse::ok(message, data),
        }
    }

    /// A `201 Created` response.
    pub fn created(link: impl Into<String>, message: impl Into<String>, data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            ..Self::ok(link, message, data)
        }
    }
}

impl<T: Serialize> IntoResponse for Linked<T> {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::LINK, self.link)],
            Json(self.body),
        )
            .into_response()
    }
}

/// Canonical path of a course.
pub fn course_link(course_id: u32) -> String {
    format!("/courses/{course_id}")
}

/// Canonical path of a student.
pub fn student_link(student_id: &str) -> String {
    format!("/students/{student_id}")
}

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the HTTP server.
///
/// The store sits behind a single mutex guarding both collections. Handlers
/// hold the guard from lookup through mutation, so check-then-write
/// sequences are atomic.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Configuration for the server.
    pub config: Config,
    /// Both collections.
    pub store: Arc<Mutex<Store>>,
    /// When this state was created.
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Creates a new `AppState` holding the built-in seed data.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_store(config, Store::builtin())
    }

    /// Creates a new `AppState` around an existing store.
    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        Self {
            config,
            store: Arc::new(Mutex::new(store)),
            started_at: Utc::now(),
        }
    }
}

// ============================================================================
// API Error Type
// ============================================================================

/// Error type returned by API handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request failed a validation rule (400).
    #[error("validation failed: {0}")]
    Validation(String),
    /// Referenced record does not exist (404).
    #[error("not found: {0}")]
    NotFound(String),
    /// Route exists but not for this method (405).
    #[error("method not allowed: {0}")]
    MethodNotAllowed(String),
    /// Primary key already taken (409).
    #[error("conflict: {0}")]
    Conflict(String),
    /// Unexpected failure (500).
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::Validation(message) => {
                warn!(reason = %message, "Request rejected by validation");
                (
                    StatusCode::BAD_REQUEST,
                    ApiResponse::<Value> {
                        errors: Some(message),
                        ..ApiResponse::failure(VALIDATION_FAILED)
                    },
                )
            }
            Self::NotFound(message) => (StatusCode::NOT_FOUND, ApiResponse::failure(message)),
            Self::MethodNotAllowed(message) => (
                StatusCode::METHOD_NOT_ALLOWED,
                ApiResponse::failure(message),
            ),
            Self::Conflict(message) => (StatusCode::CONFLICT, ApiResponse::failure(message)),
            Self::Internal(detail) => {
                error!(detail = %detail, "Internal fault");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse {
                        error: Some(detail),
                        ..ApiResponse::failure(INTERNAL_FAULT)
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<Rejection> for ApiError {
    fn from(rejection: Rejection) -> Self {
        Self::Validation(rejection.into_message())
    }
}

impl From<CampusError> for ApiError {
    fn from(err: CampusError) -> Self {
        match err {
            CampusError::CourseNotFound { .. } => Self::NotFound("Course does not exist".into()),
            CampusError::StudentNotFound { .. } => {
                Self::NotFound("Student does not exist".into())
            }
            CampusError::DuplicateCourse { .. } => {
                Self::Conflict("Course Id already exists".into())
            }
            other => Self::Internal(other.to_string()),
        }
    }
}

/// Unwraps a JSON body, turning malformed input into a validation error.
pub(crate) fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::Validation(rejection.body_text()))
}

/// Unwraps a path parameter, turning an undecodable segment into a validation error.
pub(crate) fn path_param(param: Result<Path<String>, PathRejection>) -> Result<String, ApiError> {
    param
        .map(|Path(value)| value)
        .map_err(|rejection| ApiError::Validation(rejection.body_text()))
}

// ============================================================================
// Router Setup
// ============================================================================

/// Creates the HTTP router with all API endpoints.
///
/// The returned router has:
/// - student and course routes under `config.api_prefix`
/// - the banner and identity routes at the root
/// - an enveloped 404 for unknown routes and 405 for unsupported methods
/// - panic recovery, request tracing and permissive CORS
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    let api_routes = Router::new()
        .route("/students", get(students::list_students))
        .route("/students/:student_id", get(students::get_student))
        .route(
            "/students/:student_id/courses",
            get(students::get_student_courses),
        )
        .route(
            "/courses",
            get(courses::list_courses)
                .post(courses::create_course)
                .put(courses::update_course)
                .delete(courses::delete_course),
        )
        .route("/courses/:course_id", get(courses::get_course))
        .method_not_allowed_fallback(handle_method_not_allowed);

    let prefix = state.config.api_prefix.clone();
    let root_routes = Router::new()
        .route("/", get(handle_root))
        .route("/me", get(handle_me))
        .method_not_allowed_fallback(handle_method_not_allowed);

    let router = if prefix.is_empty() || prefix == "/" {
        root_routes.merge(api_routes)
    } else {
        root_routes.nest(&prefix, api_routes)
    };

    router
        .fallback(handle_not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

// ============================================================================
// Service Handlers
// ============================================================================

/// Payload of the `GET /` banner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInfo {
    /// When the server state was created.
    pub started_at: DateTime<Utc>,
}

/// Handler for `GET /`.
async fn handle_root(State(state): State<Arc<AppState>>) -> Json<ApiResponse<ServiceInfo>> {
    Json(ApiResponse::ok(
        "Campus API service is running",
        ServiceInfo {
            started_at: state.started_at,
        },
    ))
}

/// Handler for `GET /me`.
async fn handle_me(State(state): State<Arc<AppState>>) -> Json<ApiResponse<Identity>> {
    Json(ApiResponse::ok(
        "Student Information",
        state.config.identity.clone(),
    ))
}

async fn handle_not_found() -> ApiError {
    ApiError::NotFound("Route not found".into())
}

async fn handle_method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed("Method not allowed".into())
}

/// Renders a handler panic as a 500 envelope.
fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| payload.downcast_ref::<&str>().map(|s| (*s).to_string()))
        .unwrap_or_else(|| "handler panicked".to_string());
    ApiError::Internal(detail).into_response()
}

// ============================================================================
// Tests
// ============================================================================
