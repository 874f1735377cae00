/// Typed errors for the storage layer

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Which relation a failing key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Student,
    Project,
    Grade,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Entity::Student => "student",
            Entity::Project => "project",
            Entity::Grade => "grade",
        })
    }
}

/// Errors returned by every `GradebookStore` operation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A keyed lookup matched zero rows.
    #[error("{entity} not found: {key}")]
    NotFound { entity: Entity, key: String },

    /// A create collided with an existing github or title.
    #[error("{entity} already exists: {key}")]
    DuplicateKey { entity: Entity, key: String },

    /// A create was given a blank key.
    #[error("{entity} {field} must not be blank")]
    InvalidKey {
        entity: Entity,
        field: &'static str,
    },

    /// A project bound below zero leaves no gradeable value.
    #[error("max grade {max_grade} for project {title} must not be negative")]
    InvalidMaxGrade { title: String, max_grade: i64 },

    /// A grade named a student or project that does not exist.
    #[error("grade references unknown {entity}: {key}")]
    InvalidReference { entity: Entity, key: String },

    /// A grade fell outside `0..=max_grade` for its project.
    #[error("grade {grade} is outside 0..={max_grade} for project {title}")]
    GradeOutOfRange {
        title: String,
        grade: i64,
        max_grade: i64,
    },

    /// A statement, or the wait for a pooled connection, did not finish
    /// inside its deadline.
    #[error("{operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    /// Connection or query execution failure.
    #[error("storage fault: {0}")]
    Storage(#[from] sqlx::Error),
}

impl StoreError {
    pub(crate) fn not_found(entity: Entity, key: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity,
            key: key.into(),
        }
    }

    /// Classify an insert failure: unique violations become `DuplicateKey`,
    /// everything else stays a storage fault.
    pub(crate) fn from_insert(err: sqlx::Error, entity: Entity, key: &str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::DuplicateKey {
                entity,
                key: key.to_string(),
            },
            _ => StoreError::Storage(err),
        }
    }

    /// Faults that leave the session in an unknown state. Everything else is
    /// an answer about the data and the caller may carry on.
    pub fn is_fatal(&self) -> bool {
        matches!(self, StoreError::Storage(_))
    }
}
