use tracing::debug;

use crate::common::StoreError;
use crate::domains::tv::{Tv, TvError};
use crate::kernel::BaseTvStore;

/// Insert a new record.
pub async fn create_tv(store: &dyn BaseTvStore, tv: &Tv) -> Result<(), TvError> {
    match store.insert(tv).await {
        Ok(()) => Ok(()),
        Err(StoreError::UniqueViolation) => Err(TvError::DuplicateKey { id: tv.id }),
        Err(e) => Err(TvError::Storage(e)),
    }
}

/// Fetch a record by id.
pub async fn read_tv(store: &dyn BaseTvStore, id: i64) -> Result<Tv, TvError> {
    match store.find_by_id(id).await {
        Ok(tv) => Ok(tv),
        Err(StoreError::NoRows) => Err(TvError::NotFound { id }),
        Err(e) => Err(TvError::Storage(e)),
    }
}

/// Overwrite record `id` with `tv`.
///
/// Existence is checked first: a bare overwrite that changes nothing cannot tell
/// "no such row" from "same data", and the two are reported differently.
pub async fn update_tv(store: &dyn BaseTvStore, id: i64, tv: &Tv) -> Result<(), TvError> {
    match store.find_id(id).await {
        Ok(_) => {}
        Err(StoreError::NoRows) => return Err(TvError::NotFound { id }),
        Err(e) => return Err(TvError::Storage(e)),
    }

    match store.replace(id, tv).await {
        Ok(0) => {
            debug!(id, "overwrite matched an identical row");
            Err(TvError::NoopUpdate { id })
        }
        Ok(_) => Ok(()),
        Err(StoreError::UniqueViolation) => Err(TvError::DuplicateKey { id: tv.id }),
        Err(e) => Err(TvError::Storage(e)),
    }
}

/// Remove record `id`.
pub async fn delete_tv(store: &dyn BaseTvStore, id: i64) -> Result<(), TvError> {
    match store.delete(id).await {
        Ok(0) => Err(TvError::NotFound { id }),
        Ok(_) => Ok(()),
        Err(e) => Err(TvError::Storage(e)),
    }
}
