use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Textscan API",
        version = "1.0.0",
        description = "Upload an image, get back its text with per-block confidence and location.",
    ),
    paths(handlers::health::health_check, handlers::scan::scan),
    components(schemas(
        dto::ScanUploadForm,
        dto::ScanResponse,
        dto::BlockResponse,
        dto::ErrorResponse,
        dto::HealthResponse,
    )),
    tags(
        (name = "scan", description = "Text extraction from images"),
        (name = "health", description = "Health check"),
    ),
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
