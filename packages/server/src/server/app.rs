//! Application setup and router configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::kernel::BaseTvStore;
use crate::server::middleware::extract_client_ip;
use crate::server::routes::{
    create_tv_handler, delete_tv_handler, health_handler, read_tv_handler, update_tv_handler,
};

/// Shared application state
///
/// The storage handle is the only state shared between requests.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BaseTvStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn BaseTvStore>) -> Self {
        Self { store }
    }
}

/// Routes under `/api/tv`
fn tv_routes() -> Router<AppState> {
    Router::new().route("/new", post(create_tv_handler)).route(
        "/:id",
        get(read_tv_handler)
            .put(update_tv_handler)
            .delete(delete_tv_handler),
    )
}

/// Build the Axum application router
///
/// The returned router expects `ConnectInfo<SocketAddr>`; serve it with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn build_app(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest("/api/tv", tv_routes())
        .with_state(state)
        .layer(middleware::from_fn(extract_client_ip))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
}
