// TestDependencies - in-process storage implementations for testing
//
// Provides stores that can be injected into AppState in place of Postgres.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::BaseTvStore;
use crate::common::StoreError;
use crate::domains::tv::Tv;

// =============================================================================
// In-memory store
// =============================================================================

/// A storage call, recorded in the order it was made
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Insert(i64),
    FindById(i64),
    FindId(i64),
    Replace { id: i64, new_id: i64 },
    Delete(i64),
    Ping,
}

impl StoreCall {
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            StoreCall::Insert(_) | StoreCall::Replace { .. } | StoreCall::Delete(_)
        )
    }
}

/// Keyed map with the same observable semantics as the Postgres table:
/// primary-key uniqueness, zero rows changed for an identical overwrite.
#[derive(Clone, Default)]
pub struct InMemoryTvStore {
    rows: Arc<Mutex<BTreeMap<i64, Tv>>>,
    calls: Arc<Mutex<Vec<StoreCall>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl InMemoryTvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a row without recording a call
    pub fn with_record(self, tv: Tv) -> Self {
        lock(&self.rows).insert(tv.id, tv);
        self
    }

    /// Current contents of row `id`
    pub fn get(&self, id: i64) -> Option<Tv> {
        lock(&self.rows).get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        lock(&self.rows).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All calls made so far
    pub fn calls(&self) -> Vec<StoreCall> {
        lock(&self.calls).clone()
    }

    /// Check if any mutating statement was issued
    pub fn was_written(&self) -> bool {
        lock(&self.calls).iter().any(StoreCall::is_write)
    }

    fn record(&self, call: StoreCall) {
        lock(&self.calls).push(call);
    }
}

#[async_trait]
impl BaseTvStore for InMemoryTvStore {
    async fn insert(&self, tv: &Tv) -> Result<(), StoreError> {
        self.record(StoreCall::Insert(tv.id));

        let mut rows = lock(&self.rows);
        if rows.contains_key(&tv.id) {
            return Err(StoreError::UniqueViolation);
        }
        rows.insert(tv.id, tv.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> Result<Tv, StoreError> {
        self.record(StoreCall::FindById(id));
        lock(&self.rows).get(&id).cloned().ok_or(StoreError::NoRows)
    }

    async fn find_id(&self, id: i64) -> Result<i64, StoreError> {
        self.record(StoreCall::FindId(id));
        if lock(&self.rows).contains_key(&id) {
            Ok(id)
        } else {
            Err(StoreError::NoRows)
        }
    }

    async fn replace(&self, id: i64, tv: &Tv) -> Result<u64, StoreError> {
        self.record(StoreCall::Replace { id, new_id: tv.id });

        let mut rows = lock(&self.rows);
        match rows.get(&id) {
            None => return Ok(0),
            Some(existing) if existing == tv => return Ok(0),
            Some(_) => {}
        }
        if tv.id != id && rows.contains_key(&tv.id) {
            return Err(StoreError::UniqueViolation);
        }

        rows.remove(&id);
        rows.insert(tv.id, tv.clone());
        Ok(1)
    }

    async fn delete(&self, id: i64) -> Result<u64, StoreError> {
        self.record(StoreCall::Delete(id));
        Ok(lock(&self.rows).remove(&id).map_or(0, |_| 1))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.record(StoreCall::Ping);
        Ok(())
    }
}

// =============================================================================
// Failing store
// =============================================================================

/// Store whose every call fails as if the connection pool were exhausted
#[derive(Clone, Copy, Debug, Default)]
pub struct FailingTvStore;

fn unavailable() -> StoreError {
    StoreError::Database(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl BaseTvStore for FailingTvStore {
    async fn insert(&self, _tv: &Tv) -> Result<(), StoreError> {
        Err(unavailable())
    }

    async fn find_by_id(&self, _id: i64) -> Result<Tv, StoreError> {
        Err(unavailable())
    }

    async fn find_id(&self, _id: i64) -> Result<i64, StoreError> {
        Err(unavailable())
    }

    async fn replace(&self, _id: i64, _tv: &Tv) -> Result<u64, StoreError> {
        Err(unavailable())
    }

    async fn delete(&self, _id: i64) -> Result<u64, StoreError> {
        Err(unavailable())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(unavailable())
    }
}
