pub mod tv;

pub use tv::{ValidationError, Violation, Tv};
