/// SQLite pool construction and schema bootstrap
///
/// One pool per process. Each data access call checks out its own
/// connection, so concurrent web requests never share a session.

use crate::config::DatabaseConfig;
use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

/// Open the configured database, creating the file if missing
///
/// Foreign keys are switched on for every pooled connection and the schema
/// is initialized before the pool is handed out.
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.url)
        .map_err(|e| anyhow::anyhow!("Invalid database url '{}': {}", config.url, e))?
        .create_if_missing(true)
        .foreign_keys(true);

    if let Some(parent) = Path::new(options.get_filename()).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                anyhow::anyhow!("Failed to create database directory '{}': {}", parent.display(), e)
            })?;
        }
    }

    tracing::info!("🗄️ Opening gradebook database: {}", options.get_filename().display());

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections.max(1))
        .acquire_timeout(config.acquire_timeout())
        .connect_with(options)
        .await?;

    init_schema(&pool).await?;

    tracing::info!("✅ Gradebook database ready");

    Ok(pool)
}

/// Open a private in-memory database
///
/// Held on a single connection that never idles out, since the data lives
/// only as long as that connection does.
pub async fn connect_in_memory() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    init_schema(&pool).await?;

    Ok(pool)
}

/// Create the students, projects and grades tables
///
/// Safe to call multiple times (uses IF NOT EXISTS).
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS students (
            github TEXT PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS projects (
            title TEXT PRIMARY KEY,
            description TEXT NOT NULL,
            max_grade INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // One grade per (student, project); re-grading upserts
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS grades (
            student_github TEXT NOT NULL REFERENCES students(github),
            project_title TEXT NOT NULL REFERENCES projects(title),
            grade INTEGER NOT NULL,
            PRIMARY KEY (student_github, project_title)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_grades_project ON grades(project_title)")
        .execute(pool)
        .await?;

    Ok(())
}
