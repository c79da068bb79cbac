mod anime_repository;

pub use anime_repository::{sort_column, AnimeRepository, RepositoryError};

#[cfg(test)]
pub use anime_repository::MockAnimeRepository;
