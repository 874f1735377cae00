/// HTTP API Layer
///
/// JSON routes over the gradebook store. Handlers only translate between
/// HTTP and `GradebookStore` calls:
/// - Home listing of students and projects
/// - Student lookup and creation
/// - Project lookup with its grades

// Student lookup and creation endpoints
pub mod students;

// Project lookup and home listing endpoints
pub mod projects;

use crate::store::{GradebookStore, StoreError};
use axum::{http::StatusCode, Router};

/// Application state shared by every handler
///
/// Holds a pooled store handle; each request checks out its own connection.
#[derive(Clone)]
pub struct AppState {
    pub store: GradebookStore,
}

/// Build all gradebook routes
pub fn create_routes() -> Router<AppState> {
    Router::new()
        .merge(students::create_student_routes())
        .merge(projects::create_project_routes())
}

/// Map a storage error onto an HTTP status, logging faults
pub(crate) fn status_for(err: &StoreError) -> StatusCode {
    match err {
        StoreError::NotFound { .. } => {
            tracing::debug!("{}", err);
            StatusCode::NOT_FOUND
        }
        StoreError::DuplicateKey { .. } => {
            tracing::warn!("{}", err);
            StatusCode::CONFLICT
        }
        StoreError::InvalidKey { .. } => {
            tracing::debug!("{}", err);
            StatusCode::BAD_REQUEST
        }
        StoreError::InvalidReference { .. }
        | StoreError::InvalidMaxGrade { .. }
        | StoreError::GradeOutOfRange { .. } => {
            tracing::warn!("{}", err);
            StatusCode::UNPROCESSABLE_ENTITY
        }
        StoreError::Timeout { .. } => {
            tracing::error!("⏱️ {}", err);
            StatusCode::GATEWAY_TIMEOUT
        }
        StoreError::Storage(_) => {
            tracing::error!("❌ {}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
