/// Gradebook storage layer
///
/// Owns everything that touches the database: connection pooling and schema
/// bootstrap, typed rows for students, projects and grades, and the data
/// access operations both front ends call into.

// SQLite pool construction and schema bootstrap
pub mod database;

// Typed storage errors
pub mod error;

// Data access operations over students, projects and grades
pub mod storage;

// Row types crossing the storage boundary
pub mod types;

pub use error::{Entity, StoreError};
pub use storage::GradebookStore;
pub use types::{Project, ProjectGrade, ProjectSummary, Student, StudentGrade};
