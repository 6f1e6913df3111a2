use serde::{Deserialize, Deserializer, Serialize};
use sqlx::PgPool;
use std::fmt;

use crate::common::StoreError;

pub const MIN_ID: i64 = 0;
pub const MIN_MANUFACTURER_LEN: usize = 3;
pub const MIN_MODEL_LEN: usize = 2;
pub const MIN_YEAR: i32 = 2010;

/// A television set record.
///
/// Fields missing from a JSON body, or given as `null`, decode to their zero
/// value, so an absent required field is reported by [`Tv::validate`] rather
/// than by the decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(default)]
pub struct Tv {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub brand: String,
    #[serde(deserialize_with = "null_as_default")]
    pub manufacturer: String,
    #[serde(deserialize_with = "null_as_default")]
    pub model: String,
    #[serde(deserialize_with = "null_as_default")]
    pub year: i32,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A single failed validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    IdNotPositive,
    ManufacturerTooShort,
    ModelTooShort,
    YearTooEarly,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IdNotPositive => write!(f, "id must be greater than {}.", MIN_ID),
            Self::ManufacturerTooShort => write!(
                f,
                "manufacturer field must contain greater than or equal to {} symbols.",
                MIN_MANUFACTURER_LEN
            ),
            Self::ModelTooShort => write!(
                f,
                "model field must contain greater than or equal to {} symbols.",
                MIN_MODEL_LEN
            ),
            Self::YearTooEarly => write!(f, "year must be greater than or equal to {}.", MIN_YEAR),
        }
    }
}

/// Every rule a record failed, in field order (id, manufacturer, model, year).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

impl Tv {
    /// Check every rule without stopping at the first failure.
    ///
    /// Lengths are measured in UTF-8 bytes.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Vec::new();

        if self.id <= MIN_ID {
            violations.push(Violation::IdNotPositive);
        }
        if self.manufacturer.len() < MIN_MANUFACTURER_LEN {
            violations.push(Violation::ManufacturerTooShort);
        }
        if self.model.len() < MIN_MODEL_LEN {
            violations.push(Violation::ModelTooShort);
        }
        if self.year < MIN_YEAR {
            violations.push(Violation::YearTooEarly);
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { violations })
        }
    }
}

// =============================================================================
// Tv Queries
// =============================================================================

impl Tv {
    /// Create the backing table if it does not exist yet.
    pub async fn ensure_table(pool: &PgPool) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS tv (
                id BIGINT PRIMARY KEY,
                brand TEXT NOT NULL DEFAULT '',
                manufacturer TEXT NOT NULL,
                model TEXT NOT NULL,
                year INTEGER NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn insert(&self, pool: &PgPool) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO tv (id, brand, manufacturer, model, year) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(self.id)
        .bind(&self.brand)
        .bind(&self.manufacturer)
        .bind(&self.model)
        .bind(self.year)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn find_by_id(id: i64, pool: &PgPool) -> Result<Self, StoreError> {
        sqlx::query_as::<_, Self>(
            "SELECT id, brand, manufacturer, model, year FROM tv WHERE id = $1",
        )
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Existence check used before an overwrite.
    pub async fn find_id(id: i64, pool: &PgPool) -> Result<i64, StoreError> {
        sqlx::query_scalar::<_, i64>("SELECT id FROM tv WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    /// Overwrite every column of row `id`. Returns the number of rows changed;
    /// an overwrite with identical data changes none.
    pub async fn replace(id: i64, tv: &Tv, pool: &PgPool) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE tv
            SET id = $1, brand = $2, manufacturer = $3, model = $4, year = $5
            WHERE id = $6
              AND (id, brand, manufacturer, model, year)
                  IS DISTINCT FROM ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(tv.id)
        .bind(&tv.brand)
        .bind(&tv.manufacturer)
        .bind(&tv.model)
        .bind(tv.year)
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete(id: i64, pool: &PgPool) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM tv WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}
