mod anime_query_service;

pub use anime_query_service::AnimeQueryService;
