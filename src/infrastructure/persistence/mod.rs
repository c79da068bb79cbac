mod in_memory_anime_repository;
mod postgres_anime_repository;
mod query_builder;
mod timed_anime_repository;

pub use in_memory_anime_repository::InMemoryAnimeRepository;
pub use postgres_anime_repository::PostgresAnimeRepository;
pub use query_builder::QueryBuilder;
pub use timed_anime_repository::TimedAnimeRepository;
