use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::retail::SearchClient;

pub mod handlers;
pub mod models;

/// Shared state behind every handler: the search client plus the immutable
/// process configuration.
pub struct AppState {
    pub client: SearchClient,
    pub config: Config,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/product_search/", get(handlers::search_handler))
        .route("/healthz", get(handlers::health_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
