//! Test fixtures for creating test data.

use serde_json::{json, Value};
use std::sync::atomic::{AtomicI64, Ordering};
use tv_core::domains::tv::Tv;

static NEXT_ID: AtomicI64 = AtomicI64::new(10_000);

/// An id no other test in this binary has used.
///
/// Postgres tests share one table, so they never reuse ids.
pub fn unique_id() -> i64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// The row every scenario starts from
pub fn sony_bravia(id: i64) -> Tv {
    Tv {
        id,
        brand: "Bravia".to_string(),
        manufacturer: "Sony".to_string(),
        model: "HX929".to_string(),
        year: 2011,
    }
}

pub fn philips_smart(id: i64) -> Tv {
    Tv {
        id,
        brand: "Smart".to_string(),
        manufacturer: "Philips".to_string(),
        model: "8000".to_string(),
        year: 2012,
    }
}

/// JSON body for a record
pub fn tv_json(tv: &Tv) -> Value {
    json!({
        "id": tv.id,
        "brand": tv.brand,
        "manufacturer": tv.manufacturer,
        "model": tv.model,
        "year": tv.year,
    })
}
