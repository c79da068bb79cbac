use utoipa::OpenApi;

use crate::api::errors::ErrorBody;
use crate::api::handlers::health::{HealthResponse, ReadinessResponse};
use crate::api::middleware::FieldError;
use crate::application::dto::{
    AnimeDto, AnimePageResponse, CreateAnimeRequest, FindByNameQuery, UpdateAnimeRequest,
};

/// OpenAPI specification for the anime catalog API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Anime Catalog API",
        version = "1.0.0",
        description = "Anime CRUD service with guarded paging and sanitized text"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        crate::api::handlers::health::health_handler,
        crate::api::handlers::health::readiness_handler,
        crate::api::handlers::animes::list_handler,
        crate::api::handlers::animes::find_by_name_handler,
        crate::api::handlers::animes::create_handler,
        crate::api::handlers::animes::update_handler,
        crate::api::handlers::animes::delete_handler,
    ),
    components(
        schemas(
            AnimeDto,
            AnimePageResponse,
            CreateAnimeRequest,
            UpdateAnimeRequest,
            FindByNameQuery,
            ErrorBody,
            FieldError,
            HealthResponse,
            ReadinessResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "animes", description = "Anime catalog operations")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_anime_paths() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/animes"));
        assert!(doc.paths.paths.contains_key("/animes/find-by-name"));
        assert!(doc.paths.paths.contains_key("/animes/{id}"));
        assert!(doc.paths.paths.contains_key("/health/ready"));
    }
}
