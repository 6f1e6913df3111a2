// HTTP server setup (Axum)
pub mod app;
pub mod logging;
pub mod middleware;
pub mod routes;

pub use app::*;
