#![allow(dead_code)]

use gradebook::config::DatabaseConfig;
use gradebook::store::{database, GradebookStore};
use std::time::Duration;

/// Fresh in-memory store with the schema applied.
pub async fn memory_store() -> GradebookStore {
    let pool = database::connect_in_memory()
        .await
        .expect("in-memory database");
    GradebookStore::new(pool, Duration::from_secs(5))
}

/// Store with one student (`ada`) and one project (`Tracker`, max 100).
pub async fn seeded_store() -> GradebookStore {
    let store = memory_store().await;
    store
        .create_student("Ada", "Lovelace", "ada")
        .await
        .expect("seed student");
    store
        .create_project("Tracker", "Build a tracker", 100)
        .await
        .expect("seed project");
    store
}

/// File-backed store on a one-connection pool with a short checkout wait.
///
/// Keep the returned directory alive for as long as the store is used.
pub async fn single_connection_store() -> (GradebookStore, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = DatabaseConfig {
        url: format!("sqlite://{}", dir.path().join("gradebook.db").display()),
        max_connections: 1,
        statement_timeout_ms: 5000,
        acquire_timeout_ms: 50,
    };
    let pool = database::connect(&config).await.expect("file database");
    (GradebookStore::new(pool, config.statement_timeout()), dir)
}
