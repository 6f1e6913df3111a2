//! Persistence outcome taxonomy.

use thiserror::Error;

use crate::common::StoreError;

/// Non-success outcomes of a persistence operation.
#[derive(Error, Debug)]
pub enum TvError {
    #[error("record with id:{id} is not found")]
    NotFound { id: i64 },

    #[error("duplicate key entry, id:{id}")]
    DuplicateKey { id: i64 },

    #[error("same data provided: record id:{id} wasn't updated")]
    NoopUpdate { id: i64 },

    #[error("storage failure")]
    Storage(#[source] StoreError),
}

impl TvError {
    /// True only for faults on our side; everything else is client-correctable.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}
