use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::CreateAnimeRequest;
use crate::application::errors::AnimeServiceError;
use crate::application::hardening::{
    sanitize, sanitize_text, PageRequestGuard, PagingPolicy, ResultPageGuard, SanitizeRecord,
};
use crate::application::ports::AnimeRepository;
use crate::domain::entities::{Anime, NewAnime};
use crate::domain::value_objects::{AnimeId, PagingRequest, ResultPage};

/// Use case: list, search, create, rename and delete animes.
///
/// Every page goes through the entry guard before storage sees it and
/// through the exit guard before the caller sees the result.
pub struct AnimeQueryService {
    anime_repo: Arc<dyn AnimeRepository>,
    page_request_guard: PageRequestGuard,
    result_page_guard: ResultPageGuard,
}

impl AnimeQueryService {
    pub fn new(anime_repo: Arc<dyn AnimeRepository>) -> Self {
        Self::with_policy(anime_repo, PagingPolicy::default())
    }

    pub fn with_policy(anime_repo: Arc<dyn AnimeRepository>, policy: PagingPolicy) -> Self {
        Self {
            anime_repo,
            result_page_guard: ResultPageGuard::new(&policy),
            page_request_guard: PageRequestGuard::new(policy),
        }
    }

    /// List every anime, paged
    pub async fn list_all(
        &self,
        raw_paging: &PagingRequest,
    ) -> Result<ResultPage<Anime>, AnimeServiceError> {
        let paging = self.page_request_guard.guard(raw_paging);
        debug!(?paging, "Listing animes");

        let page = self.anime_repo.fetch_all(&paging).await?;
        Ok(self.result_page_guard.guard(Some(page))?)
    }

    /// Search by name, either as a substring or as an exact match
    pub async fn find_by_filter(
        &self,
        raw_paging: &PagingRequest,
        raw_name: Option<&str>,
        contains: bool,
    ) -> Result<ResultPage<Anime>, AnimeServiceError> {
        let name = sanitize(raw_name)
            .ok_or_else(|| AnimeServiceError::InvalidInput("invalid name".to_string()))?;
        let paging = self.page_request_guard.guard(raw_paging);
        debug!(%name, contains, ?paging, "Searching animes by name");

        let page = if contains {
            self.anime_repo.fetch_by_substring(&name, &paging).await?
        } else {
            self.anime_repo.fetch_by_exact(&name, &paging).await?
        };
        Ok(self.result_page_guard.guard(Some(page))?)
    }

    /// Persist a new anime and return a sanitized echo of what was stored
    pub async fn create(&self, request: CreateAnimeRequest) -> Result<Anime, AnimeServiceError> {
        let name = sanitize_text(&request.name);
        // The sanitizer maps empty output to the marker, so this only fires
        // if that rule changes.
        if name.trim().is_empty() {
            warn!("Rejected anime without usable name");
            return Err(AnimeServiceError::InvalidInput(
                "enter a valid name (markup alone is not allowed)".to_string(),
            ));
        }

        let saved = self.anime_repo.save(&NewAnime::new(name)).await?;
        info!(id = %saved.id(), "Anime created");
        Ok(saved.sanitized())
    }

    /// Delete by id and return the item as it was before deletion
    pub async fn delete_by_id(&self, id: AnimeId) -> Result<Anime, AnimeServiceError> {
        let anime = self.find_existing(id).await?;
        self.anime_repo.delete(&anime).await?;
        info!(%id, "Anime deleted");
        Ok(anime)
    }

    /// Rename an anime; the read-modify-write happens in one unit of work
    pub async fn update_name(
        &self,
        id: AnimeId,
        raw_new_name: Option<&str>,
    ) -> Result<Anime, AnimeServiceError> {
        self.find_existing(id).await?;

        let name = sanitize(raw_new_name)
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| AnimeServiceError::InvalidInput("invalid name".to_string()))?;

        let updated = self
            .anime_repo
            .update_name(id, &name)
            .await?
            .ok_or_else(|| AnimeServiceError::NotFound(format!("anime {}", id)))?;
        info!(%id, "Anime renamed");
        Ok(updated)
    }

    /// Storage readiness
    pub async fn ping(&self) -> Result<(), AnimeServiceError> {
        Ok(self.anime_repo.ping().await?)
    }

    async fn find_existing(&self, id: AnimeId) -> Result<Anime, AnimeServiceError> {
        self.anime_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AnimeServiceError::NotFound(format!("anime {}", id)))
    }
}
