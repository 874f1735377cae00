/// Student REST endpoints
///
/// Lookup by GitHub account (with the student's grades) and creation from a
/// submitted form.

use crate::api::{status_for, AppState};
use crate::store::{Student, StudentGrade};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Form, Router,
};
use serde::{Deserialize, Serialize};

/// Query string for student lookup
#[derive(Debug, Deserialize)]
pub struct StudentQuery {
    pub github: String,
}

/// Form fields for adding a student
#[derive(Debug, Deserialize)]
pub struct NewStudentForm {
    pub fname: String,
    pub lname: String,
    pub github: String,
}

/// A student together with every grade they received
#[derive(Debug, Serialize, Deserialize)]
pub struct StudentDetail {
    pub student: Student,
    pub grades: Vec<StudentGrade>,
}

/// Create student routes
pub fn create_student_routes() -> Router<AppState> {
    Router::new()
        .route("/student", get(get_student))
        .route("/student-add", post(add_student))
}

/// Show a student and their grades
///
/// GET /student?github=...
/// Returns: { "student": { ... }, "grades": [{ "project_title": "...", "grade": 0 }] }
async fn get_student(
    State(state): State<AppState>,
    Query(query): Query<StudentQuery>,
) -> Result<Json<StudentDetail>, StatusCode> {
    let student = state
        .store
        .get_student_by_github(&query.github)
        .await
        .map_err(|e| status_for(&e))?;

    let grades = state
        .store
        .list_grades_for_student(&student.github)
        .await
        .map_err(|e| status_for(&e))?;

    Ok(Json(StudentDetail { student, grades }))
}

/// Add a student
///
/// POST /student-add
/// Form: fname=...&lname=...&github=...
async fn add_student(
    State(state): State<AppState>,
    Form(form): Form<NewStudentForm>,
) -> Result<(StatusCode, Json<Student>), StatusCode> {
    let student = state
        .store
        .create_student(&form.fname, &form.lname, &form.github)
        .await
        .map_err(|e| status_for(&e))?;

    Ok((StatusCode::CREATED, Json(student)))
}
