/// Project REST endpoints and the home listing

use crate::api::{status_for, AppState};
use crate::store::{Project, ProjectGrade, ProjectSummary, Student};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ProjectQuery {
    pub title: String,
}

/// A project together with every grade given on it
#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectDetail {
    pub project: Project,
    pub grades: Vec<ProjectGrade>,
}

/// Everything the home page lists
#[derive(Debug, Serialize, Deserialize)]
pub struct HomeListing {
    pub projects: Vec<ProjectSummary>,
    pub students: Vec<Student>,
}

pub fn create_project_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/project", get(get_project))
}

/// List all projects and students
///
/// GET /
async fn home(State(state): State<AppState>) -> Result<Json<HomeListing>, StatusCode> {
    let projects = state.store.list_projects().await.map_err(|e| status_for(&e))?;
    let students = state.store.list_students().await.map_err(|e| status_for(&e))?;

    Ok(Json(HomeListing { projects, students }))
}

/// Show a project and its grades
///
/// GET /project?title=...
async fn get_project(
    State(state): State<AppState>,
    Query(query): Query<ProjectQuery>,
) -> Result<Json<ProjectDetail>, StatusCode> {
    let project = state
        .store
        .get_project_by_title(&query.title)
        .await
        .map_err(|e| status_for(&e))?;

    let grades = state
        .store
        .list_grades_for_project(&project.title)
        .await
        .map_err(|e| status_for(&e))?;

    tracing::debug!("Project {} has {} grade(s)", project.title, grades.len());

    Ok(Json(ProjectDetail { project, grades }))
}
