/// Row types for students, projects and grades
///
/// These are the only shapes that cross the storage boundary. Both the shell
/// and the web routes render them; nothing here knows how.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An enrolled student, keyed by GitHub account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub first_name: String,
    pub last_name: String,
    /// Unique, immutable external identifier used by every other lookup
    pub github: String,
}

/// A class project, keyed by title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Project {
    /// Unique, immutable project title
    pub title: String,
    pub description: String,
    /// Upper bound for grades on this project
    pub max_grade: i64,
}

/// Project listing entry for the home page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ProjectSummary {
    pub title: String,
}

/// One grade seen from the student's side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct StudentGrade {
    pub project_title: String,
    pub grade: i64,
}

/// One grade seen from the project's side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ProjectGrade {
    pub student_github: String,
    pub grade: i64,
}
