use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::openapi;
use super::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let scan = Router::new()
        .route("/scan", post(handlers::scan))
        .layer(DefaultBodyLimit::max(state.config.server.max_upload_bytes));

    Router::new()
        .merge(scan)
        .route("/health", get(handlers::health_check))
        .route("/openapi.json", get(openapi::openapi_json))
        .merge(openapi::redoc_router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
