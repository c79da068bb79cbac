use axum::{
    response::Json,
    routing::{delete, get},
    Router,
};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use utoipa::OpenApi;

use crate::api::handlers::{
    create_handler, delete_handler, find_by_name_handler, health_handler, list_handler,
    readiness_handler, update_handler,
};
use crate::api::middleware::create_cors_layer;
use crate::api::openapi::ApiDoc;
use crate::application::use_cases::AnimeQueryService;

/// Application state container
pub struct AppState {
    pub anime_service: Arc<AnimeQueryService>,
    pub max_body_bytes: usize,
    pub allowed_origins: String,
}

/// Create router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let service = Arc::clone(&state.anime_service);

    let animes = Router::new()
        .route(
            "/animes",
            get(list_handler).post(create_handler).put(update_handler),
        )
        .route("/animes/find-by-name", get(find_by_name_handler))
        .route("/animes/{id}", delete(delete_handler))
        .route("/health/ready", get(readiness_handler))
        .with_state(service);

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .merge(animes)
        .layer(RequestBodyLimitLayer::new(state.max_body_bytes))
        .layer(create_cors_layer(&state.allowed_origins))
}
