//! Television records: model, validation, persistence operations.

pub mod actions;
pub mod errors;
pub mod models;

pub use actions::*;
pub use errors::TvError;
pub use models::{Tv, ValidationError, Violation};
