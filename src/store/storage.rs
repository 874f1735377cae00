/// Data access operations for students, projects and grades
///
/// Every shell command and web route reaches storage through this type.
/// Operations return rows or a typed `StoreError`; none of them print.
/// Each write commits on its own, and `assign_grade` is the only operation
/// that spans several statements (inside one transaction).

use crate::store::error::{Entity, StoreError};
use crate::store::types::{Project, ProjectGrade, ProjectSummary, Student, StudentGrade};
use sqlx::sqlite::SqlitePool;
use std::future::Future;
use std::time::Duration;

/// Handle to the gradebook tables
///
/// Cheap to clone: clones share the underlying pool.
#[derive(Debug, Clone)]
pub struct GradebookStore {
    /// SQLite connection pool
    pool: SqlitePool,
    /// Deadline applied to every statement or transaction
    statement_timeout: Duration,
}

impl GradebookStore {
    /// Create new store over an initialized pool
    pub fn new(pool: SqlitePool, statement_timeout: Duration) -> Self {
        Self {
            pool,
            statement_timeout,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run one storage round-trip under the statement deadline
    async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match tokio::time::timeout(self.statement_timeout, fut).await {
            // Waiting out the pool is a timeout too, not a broken session
            Ok(Err(StoreError::Storage(sqlx::Error::PoolTimedOut))) => {
                let after = self.pool.options().get_acquire_timeout();
                tracing::warn!("⏱️ {} found no free connection within {:?}", operation, after);
                Err(StoreError::Timeout { operation, after })
            }
            Ok(result) => result,
            Err(_) => {
                tracing::warn!("⏱️ {} exceeded {:?}", operation, self.statement_timeout);
                Err(StoreError::Timeout {
                    operation,
                    after: self.statement_timeout,
                })
            }
        }
    }

    /// List all students, ordered by GitHub account
    pub async fn list_students(&self) -> Result<Vec<Student>, StoreError> {
        tracing::debug!("Listing students");
        self.bounded("list_students", async {
            let students = sqlx::query_as::<_, Student>(
                "SELECT first_name, last_name, github FROM students ORDER BY github",
            )
            .fetch_all(&self.pool)
            .await?;
            Ok::<_, StoreError>(students)
        })
        .await
    }

    /// Exact-match lookup by GitHub account
    pub async fn get_student_by_github(&self, github: &str) -> Result<Student, StoreError> {
        tracing::debug!("Looking up student: {}", github);
        self.bounded("get_student_by_github", async {
            sqlx::query_as::<_, Student>(
                "SELECT first_name, last_name, github FROM students WHERE github = ?",
            )
            .bind(github)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::not_found(Entity::Student, github))
        })
        .await
    }

    /// Insert a new student
    ///
    /// Fails with `InvalidKey` for a blank GitHub account and with
    /// `DuplicateKey` when it is already taken; the existing row is left
    /// untouched.
    pub async fn create_student(
        &self,
        first_name: &str,
        last_name: &str,
        github: &str,
    ) -> Result<Student, StoreError> {
        if github.trim().is_empty() {
            return Err(StoreError::InvalidKey {
                entity: Entity::Student,
                field: "github",
            });
        }

        self.bounded("create_student", async {
            sqlx::query("INSERT INTO students (first_name, last_name, github) VALUES (?, ?, ?)")
                .bind(first_name)
                .bind(last_name)
                .bind(github)
                .execute(&self.pool)
                .await
                .map_err(|e| StoreError::from_insert(e, Entity::Student, github))?;
            Ok::<_, StoreError>(())
        })
        .await?;

        tracing::info!("Added student: {} {} ({})", first_name, last_name, github);

        Ok(Student {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            github: github.to_string(),
        })
    }

    /// List all project titles, ordered by title
    pub async fn list_projects(&self) -> Result<Vec<ProjectSummary>, StoreError> {
        tracing::debug!("Listing projects");
        self.bounded("list_projects", async {
            let projects =
                sqlx::query_as::<_, ProjectSummary>("SELECT title FROM projects ORDER BY title")
                    .fetch_all(&self.pool)
                    .await?;
            Ok::<_, StoreError>(projects)
        })
        .await
    }

    /// Exact-match lookup by project title
    pub async fn get_project_by_title(&self, title: &str) -> Result<Project, StoreError> {
        tracing::debug!("Looking up project: {}", title);
        self.bounded("get_project_by_title", async {
            sqlx::query_as::<_, Project>(
                "SELECT title, description, max_grade FROM projects WHERE title = ?",
            )
            .bind(title)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::not_found(Entity::Project, title))
        })
        .await
    }

    /// Insert a new project
    ///
    /// Fails with `InvalidKey` for a blank title, `InvalidMaxGrade` for a
    /// negative bound and `DuplicateKey` when the title is already taken.
    pub async fn create_project(
        &self,
        title: &str,
        description: &str,
        max_grade: i64,
    ) -> Result<Project, StoreError> {
        if title.trim().is_empty() {
            return Err(StoreError::InvalidKey {
                entity: Entity::Project,
                field: "title",
            });
        }
        if max_grade < 0 {
            return Err(StoreError::InvalidMaxGrade {
                title: title.to_string(),
                max_grade,
            });
        }

        self.bounded("create_project", async {
            sqlx::query("INSERT INTO projects (title, description, max_grade) VALUES (?, ?, ?)")
                .bind(title)
                .bind(description)
                .bind(max_grade)
                .execute(&self.pool)
                .await
                .map_err(|e| StoreError::from_insert(e, Entity::Project, title))?;
            Ok::<_, StoreError>(())
        })
        .await?;

        tracing::info!("Added project: {} (max grade {})", title, max_grade);

        Ok(Project {
            title: title.to_string(),
            description: description.to_string(),
            max_grade,
        })
    }

    /// Grade one student received on one project
    pub async fn get_grade(&self, github: &str, title: &str) -> Result<i64, StoreError> {
        tracing::debug!("Looking up grade: {} / {}", github, title);
        self.bounded("get_grade", async {
            sqlx::query_scalar::<_, i64>(
                "SELECT grade FROM grades WHERE student_github = ? AND project_title = ?",
            )
            .bind(github)
            .bind(title)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::not_found(Entity::Grade, format!("{github}/{title}")))
        })
        .await
    }

    /// Every grade one student has, ordered by project title
    pub async fn list_grades_for_student(
        &self,
        github: &str,
    ) -> Result<Vec<StudentGrade>, StoreError> {
        tracing::debug!("Listing grades for student: {}", github);
        self.bounded("list_grades_for_student", async {
            let grades = sqlx::query_as::<_, StudentGrade>(
                "SELECT project_title, grade FROM grades WHERE student_github = ? ORDER BY project_title",
            )
            .bind(github)
            .fetch_all(&self.pool)
            .await?;
            Ok::<_, StoreError>(grades)
        })
        .await
    }

    /// Every grade given on one project, ordered by student
    pub async fn list_grades_for_project(
        &self,
        title: &str,
    ) -> Result<Vec<ProjectGrade>, StoreError> {
        tracing::debug!("Listing grades for project: {}", title);
        self.bounded("list_grades_for_project", async {
            let grades = sqlx::query_as::<_, ProjectGrade>(
                "SELECT student_github, grade FROM grades WHERE project_title = ? ORDER BY student_github",
            )
            .bind(title)
            .fetch_all(&self.pool)
            .await?;
            Ok::<_, StoreError>(grades)
        })
        .await
    }

    /// Record a student's grade on a project
    ///
    /// Runs as one transaction: both referenced rows must exist and the grade
    /// must lie in `0..=max_grade`. An existing grade for the same pair is
    /// replaced, never duplicated.
    pub async fn assign_grade(
        &self,
        github: &str,
        title: &str,
        grade: i64,
    ) -> Result<(), StoreError> {
        self.bounded("assign_grade", async {
            let mut tx = self.pool.begin().await?;

            let student: Option<String> =
                sqlx::query_scalar("SELECT github FROM students WHERE github = ?")
                    .bind(github)
                    .fetch_optional(&mut *tx)
                    .await?;
            if student.is_none() {
                return Err(StoreError::InvalidReference {
                    entity: Entity::Student,
                    key: github.to_string(),
                });
            }

            let max_grade: Option<i64> =
                sqlx::query_scalar("SELECT max_grade FROM projects WHERE title = ?")
                    .bind(title)
                    .fetch_optional(&mut *tx)
                    .await?;
            let Some(max_grade) = max_grade else {
                return Err(StoreError::InvalidReference {
                    entity: Entity::Project,
                    key: title.to_string(),
                });
            };

            if !(0..=max_grade).contains(&grade) {
                return Err(StoreError::GradeOutOfRange {
                    title: title.to_string(),
                    grade,
                    max_grade,
                });
            }

            sqlx::query(
                r#"
                INSERT INTO grades (student_github, project_title, grade)
                VALUES (?, ?, ?)
                ON CONFLICT(student_github, project_title) DO UPDATE SET
                    grade = excluded.grade
                "#,
            )
            .bind(github)
            .bind(title)
            .bind(grade)
            .execute(&mut *tx)
            .await?;

            tx.commit().await?;
            Ok::<_, StoreError>(())
        })
        .await?;

        tracing::info!("Assigned grade {} to {} on {}", grade, github, title);

        Ok(())
    }
}
