use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};
use std::num::IntErrorKind;
use std::sync::Arc;

use crate::api::errors::ApiError;
use crate::api::middleware::validate_and_respond;
use crate::application::dto::{
    AnimeDto, AnimePageResponse, CreateAnimeRequest, FindByNameQuery, UpdateAnimeRequest,
};
use crate::application::use_cases::AnimeQueryService;
use crate::domain::value_objects::{AnimeId, PagingRequest, SortOrder};

/// Build the raw paging input from `page`, `size` and repeated `sort` parameters.
///
/// Missing or unparseable numbers fall back to 0 and numbers beyond the `i64`
/// range saturate; the service guard takes it from there.
pub fn paging_from_params(params: &[(String, String)]) -> PagingRequest {
    let mut paging = PagingRequest::default();
    for (key, value) in params {
        match key.as_str() {
            "page" => paging.page_number = parse_number(value),
            "size" => paging.page_size = parse_number(value),
            "sort" => {
                if let Some(order) = SortOrder::parse_param(value) {
                    paging = paging.with_sort(order);
                }
            }
            _ => {}
        }
    }
    paging
}

fn parse_number(value: &str) -> i64 {
    match value.trim().parse::<i64>() {
        Ok(number) => number,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => i64::MAX,
            IntErrorKind::NegOverflow => i64::MIN,
            _ => 0,
        },
    }
}

type QueryParams = Result<Query<Vec<(String, String)>>, QueryRejection>;

fn query_params(params: QueryParams) -> Result<Vec<(String, String)>, ApiError> {
    params
        .map(|Query(pairs)| pairs)
        .map_err(|e| ApiError::bad_request(e.body_text()))
}

/// GET /animes
/// List animes, paged
#[utoipa::path(
    get,
    path = "/animes",
    tag = "animes",
    params(
        ("page" = Option<i64>, Query, description = "Zero-based page number (default: 0)"),
        ("size" = Option<i64>, Query, description = "Page size (default: 5, max: 50)"),
        ("sort" = Option<String>, Query, description = "Repeatable `field[,asc|desc]`; fields: id, name")
    ),
    responses(
        (status = 200, description = "Page retrieved successfully", body = AnimePageResponse),
        (status = 400, description = "Invalid request parameters"),
        (status = 503, description = "Storage timed out"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_handler(
    State(service): State<Arc<AnimeQueryService>>,
    params: QueryParams,
) -> Result<Json<AnimePageResponse>, ApiError> {
    let paging = paging_from_params(&query_params(params)?);

    let page = service.list_all(&paging).await?;

    Ok(Json(page.into()))
}

/// GET /animes/find-by-name
/// Search animes by name, either contained or exact
#[utoipa::path(
    get,
    path = "/animes/find-by-name",
    tag = "animes",
    params(
        ("name" = String, Query, description = "Name to look for (1-50 chars: letters, digits, spaces, `-._`)"),
        ("contains" = Option<bool>, Query, description = "Substring match when true (default: false)"),
        ("page" = Option<i64>, Query, description = "Zero-based page number"),
        ("size" = Option<i64>, Query, description = "Page size"),
        ("sort" = Option<String>, Query, description = "Repeatable `field[,asc|desc]`")
    ),
    responses(
        (status = 200, description = "Matching page", body = AnimePageResponse),
        (status = 400, description = "Invalid name or parameters"),
        (status = 503, description = "Storage timed out"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn find_by_name_handler(
    State(service): State<Arc<AnimeQueryService>>,
    filter: Result<Query<FindByNameQuery>, QueryRejection>,
    params: QueryParams,
) -> Result<Json<AnimePageResponse>, ApiError> {
    let Query(filter) = filter.map_err(|e| ApiError::bad_request(e.body_text()))?;
    validate_and_respond(&filter)?;
    let paging = paging_from_params(&query_params(params)?);

    let page = service
        .find_by_filter(&paging, Some(&filter.name), filter.contains)
        .await?;

    Ok(Json(page.into()))
}

/// POST /animes
/// Create an anime
#[utoipa::path(
    post,
    path = "/animes",
    tag = "animes",
    request_body = CreateAnimeRequest,
    responses(
        (status = 201, description = "Anime created", body = AnimeDto),
        (status = 400, description = "Invalid body"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_handler(
    State(service): State<Arc<AnimeQueryService>>,
    payload: Result<Json<CreateAnimeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AnimeDto>), ApiError> {
    let Json(request) = payload?;
    validate_and_respond(&request)?;

    let created = service.create(request).await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// PUT /animes
/// Rename an anime
#[utoipa::path(
    put,
    path = "/animes",
    tag = "animes",
    request_body = UpdateAnimeRequest,
    responses(
        (status = 200, description = "Anime renamed", body = AnimeDto),
        (status = 400, description = "Invalid body"),
        (status = 404, description = "Anime not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_handler(
    State(service): State<Arc<AnimeQueryService>>,
    payload: Result<Json<UpdateAnimeRequest>, JsonRejection>,
) -> Result<Json<AnimeDto>, ApiError> {
    let Json(request) = payload?;
    validate_and_respond(&request)?;
    let id = AnimeId::new(request.id).map_err(|e| ApiError::bad_request(e.to_string()))?;

    let updated = service.update_name(id, Some(&request.name)).await?;

    Ok(Json(updated.into()))
}

/// DELETE /animes/{id}
/// Delete an anime and echo it back
#[utoipa::path(
    delete,
    path = "/animes/{id}",
    tag = "animes",
    params(
        ("id" = i64, Path, description = "Anime identifier")
    ),
    responses(
        (status = 200, description = "Anime deleted", body = AnimeDto),
        (status = 400, description = "Invalid identifier"),
        (status = 404, description = "Anime not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_handler(
    State(service): State<Arc<AnimeQueryService>>,
    Path(id): Path<String>,
) -> Result<Json<AnimeDto>, ApiError> {
    let id = id
        .parse::<AnimeId>()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let deleted = service.delete_by_id(id).await?;

    Ok(Json(deleted.into()))
}
