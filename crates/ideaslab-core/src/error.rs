//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

/// Failures surfaced by the idea access layer.
///
/// "Not found" is not an error: reads return `Ok(None)` instead.
#[derive(Debug, Error)]
pub enum IdeaError {
    #[error("No authenticated caller")]
    Access,

    #[error("Write rejected: {0}")]
    Write(#[from] WriteError),

    #[error("Read failed: {0}")]
    Read(String),
}

/// Reasons a create, update or ownership claim did not go through.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("No idea {0} owned by the caller")]
    NoMatchingRow(Uuid),

    #[error("Store rejected the write: {0}")]
    Rejected(String),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl IdeaError {
    pub(crate) fn read(err: RepoError) -> Self {
        IdeaError::Read(err.to_string())
    }

    pub(crate) fn rejected(err: RepoError) -> Self {
        IdeaError::Write(WriteError::Rejected(err.to_string()))
    }
}
