// Common types shared across the application

pub mod response;
pub mod store_error;

pub use response::*;
pub use store_error::*;
