// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Outcome classification lives in domains/tv/actions.
//
// Naming convention: Base* for trait names (e.g., BaseTvStore)

use async_trait::async_trait;

use crate::common::StoreError;
use crate::domains::tv::Tv;

// =============================================================================
// Storage Trait (Infrastructure - parameterized statements over the tv table)
// =============================================================================

#[async_trait]
pub trait BaseTvStore: Send + Sync {
    /// Insert a new row. Fails with `UniqueViolation` if the id is taken.
    async fn insert(&self, tv: &Tv) -> Result<(), StoreError>;

    /// Fetch a row by id. Fails with `NoRows` if absent.
    async fn find_by_id(&self, id: i64) -> Result<Tv, StoreError>;

    /// Look up a row by id, returning the id. Fails with `NoRows` if absent.
    async fn find_id(&self, id: i64) -> Result<i64, StoreError>;

    /// Overwrite row `id` with `tv` (including its id).
    /// Returns rows changed; identical data changes nothing.
    async fn replace(&self, id: i64, tv: &Tv) -> Result<u64, StoreError>;

    /// Delete row `id`, returning rows affected.
    async fn delete(&self, id: i64) -> Result<u64, StoreError>;

    /// Round-trip to the backend (health checks)
    async fn ping(&self) -> Result<(), StoreError>;
}
