// Postgres-backed storage handle

use async_trait::async_trait;
use sqlx::PgPool;

use super::BaseTvStore;
use crate::common::StoreError;
use crate::domains::tv::Tv;

/// `BaseTvStore` over a sqlx connection pool.
///
/// The pool is cheap to clone and safe to share across requests.
#[derive(Clone, Debug)]
pub struct PgTvStore {
    pool: PgPool,
}

impl PgTvStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the tv table if it is missing.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        Tv::ensure_table(&self.pool).await
    }
}

#[async_trait]
impl BaseTvStore for PgTvStore {
    async fn insert(&self, tv: &Tv) -> Result<(), StoreError> {
        tv.insert(&self.pool).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Tv, StoreError> {
        Tv::find_by_id(id, &self.pool).await
    }

    async fn find_id(&self, id: i64) -> Result<i64, StoreError> {
        Tv::find_id(id, &self.pool).await
    }

    async fn replace(&self, id: i64, tv: &Tv) -> Result<u64, StoreError> {
        Tv::replace(id, tv, &self.pool).await
    }

    async fn delete(&self, id: i64) -> Result<u64, StoreError> {
        Tv::delete(id, &self.pool).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
