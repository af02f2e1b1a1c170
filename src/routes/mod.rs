use crate::models::AppState;
use axum::{Router, extract::DefaultBodyLimit, http::header};
use tower_http::cors::{Any, CorsLayer};

pub mod category_routes;
pub mod configuration_routes;
pub mod domain_routes;
pub mod practice_routes;
pub mod workbook_routes;

pub fn router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    let api = Router::new()
        .merge(practice_routes::router())
        .merge(configuration_routes::router())
        .merge(category_routes::router())
        .merge(domain_routes::router())
        .merge(workbook_routes::router());

    Router::new()
        .nest("/api/v1", api)
        .layer(body_limit)
        .with_state(state)
}

/// The mapping form runs in the browser and talks to this API directly, so
/// the download headers it reads must be exposed.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([
            header::CONTENT_DISPOSITION,
            workbook_routes::TOTAL_MAPPINGS_HEADER,
        ])
}
