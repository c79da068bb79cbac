use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::{Anime, NewAnime};
use crate::domain::value_objects::{AnimeId, PagingRequest, ResultPage};
#[cfg(test)]
use mockall::{automock, predicate::*};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Anime not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Unsupported sort field: {0}")]
    UnsupportedSortField(String),

    #[error("Query exceeded {0} ms")]
    Timeout(u64),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Port for anime persistence operations.
///
/// Paged fetches expect an already guarded [`PagingRequest`]; implementations
/// still refuse to sort by anything outside [`Anime::SORTABLE_FIELDS`].
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AnimeRepository: Send + Sync {
    /// All animes, paged
    async fn fetch_all(&self, paging: &PagingRequest) -> Result<ResultPage<Anime>, RepositoryError>;

    /// Animes whose name contains `text`
    async fn fetch_by_substring(
        &self,
        text: &str,
        paging: &PagingRequest,
    ) -> Result<ResultPage<Anime>, RepositoryError>;

    /// Animes whose name equals `text`
    async fn fetch_by_exact(
        &self,
        text: &str,
        paging: &PagingRequest,
    ) -> Result<ResultPage<Anime>, RepositoryError>;

    async fn find_by_id(&self, id: AnimeId) -> Result<Option<Anime>, RepositoryError>;

    /// Insert a new anime and return it with its assigned identifier
    async fn save(&self, anime: &NewAnime) -> Result<Anime, RepositoryError>;

    /// Delete an anime; deleting a missing row is a no-op
    async fn delete(&self, anime: &Anime) -> Result<(), RepositoryError>;

    /// Rename inside a single unit of work (lock, read, write).
    ///
    /// Returns `None` when the row no longer exists.
    async fn update_name(&self, id: AnimeId, name: &str) -> Result<Option<Anime>, RepositoryError>;

    /// Cheap connectivity check for readiness probes
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Map a sort field to its column, refusing anything not sortable
pub fn sort_column(field: &str) -> Result<&'static str, RepositoryError> {
    Anime::SORTABLE_FIELDS
        .iter()
        .find(|candidate| **candidate == field)
        .copied()
        .ok_or_else(|| RepositoryError::UnsupportedSortField(field.to_string()))
}
