//! Tv domain actions - persistence operations
//!
//! Called directly from the HTTP handlers after the record has been validated.
//! Each action issues one statement (two for update) and classifies the result.

pub mod core;

pub use self::core::*;
