// HTTP routes
pub mod health;
pub mod tv;

pub use health::*;
pub use tv::*;
