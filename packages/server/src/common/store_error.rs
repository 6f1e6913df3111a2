//! Storage error classification.
//!
//! Every storage backend reports failures through [`StoreError`], so callers
//! switch on a closed set of kinds instead of inspecting driver messages.

use sqlx::error::{DatabaseError, ErrorKind};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// The query matched no rows.
    #[error("no rows in result set")]
    NoRows,

    /// A primary key or unique constraint rejected the write.
    #[error("unique constraint violated")]
    UniqueViolation,

    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        if matches!(error, sqlx::Error::RowNotFound) {
            return Self::NoRows;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::UniqueViolation,
            _ => Self::Database(error),
        }
    }
}
