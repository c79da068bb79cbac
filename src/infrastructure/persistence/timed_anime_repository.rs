use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::application::ports::{AnimeRepository, RepositoryError};
use crate::domain::entities::{Anime, NewAnime};
use crate::domain::value_objects::{AnimeId, PagingRequest, ResultPage};

/// Bounds every storage call with a deadline.
///
/// A call that does not finish in time fails with
/// [`RepositoryError::Timeout`]; the inner future is dropped, which also
/// rolls back an open transaction.
pub struct TimedAnimeRepository {
    inner: Arc<dyn AnimeRepository>,
    limit: Duration,
}

impl TimedAnimeRepository {
    pub fn new(inner: Arc<dyn AnimeRepository>, limit: Duration) -> Self {
        Self { inner, limit }
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = Result<T, RepositoryError>>,
    ) -> Result<T, RepositoryError> {
        match tokio::time::timeout(self.limit, call).await {
            Ok(result) => result,
            Err(_) => {
                let limit_ms = self.limit.as_millis() as u64;
                warn!(operation, limit_ms, "Storage call timed out");
                Err(RepositoryError::Timeout(limit_ms))
            }
        }
    }
}

#[async_trait]
impl AnimeRepository for TimedAnimeRepository {
    async fn fetch_all(&self, paging: &PagingRequest) -> Result<ResultPage<Anime>, RepositoryError> {
        self.bounded("fetch_all", self.inner.fetch_all(paging)).await
    }

    async fn fetch_by_substring(
        &self,
        text: &str,
        paging: &PagingRequest,
    ) -> Result<ResultPage<Anime>, RepositoryError> {
        self.bounded("fetch_by_substring", self.inner.fetch_by_substring(text, paging))
            .await
    }

    async fn fetch_by_exact(
        &self,
        text: &str,
        paging: &PagingRequest,
    ) -> Result<ResultPage<Anime>, RepositoryError> {
        self.bounded("fetch_by_exact", self.inner.fetch_by_exact(text, paging))
            .await
    }

    async fn find_by_id(&self, id: AnimeId) -> Result<Option<Anime>, RepositoryError> {
        self.bounded("find_by_id", self.inner.find_by_id(id)).await
    }

    async fn save(&self, anime: &NewAnime) -> Result<Anime, RepositoryError> {
        self.bounded("save", self.inner.save(anime)).await
    }

    async fn delete(&self, anime: &Anime) -> Result<(), RepositoryError> {
        self.bounded("delete", self.inner.delete(anime)).await
    }

    async fn update_name(&self, id: AnimeId, name: &str) -> Result<Option<Anime>, RepositoryError> {
        self.bounded("update_name", self.inner.update_name(id, name))
            .await
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        self.bounded("ping", self.inner.ping()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockAnimeRepository;
    use crate::infrastructure::persistence::InMemoryAnimeRepository;

    /// Never answers within any reasonable deadline
    struct StalledRepository;

    #[async_trait]
    impl AnimeRepository for StalledRepository {
        async fn fetch_all(&self, _: &PagingRequest) -> Result<ResultPage<Anime>, RepositoryError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(ResultPage::empty(0, 5))
        }

        async fn fetch_by_substring(
            &self,
            _: &str,
            _: &PagingRequest,
        ) -> Result<ResultPage<Anime>, RepositoryError> {
            std::future::pending().await
        }

        async fn fetch_by_exact(
            &self,
            _: &str,
            _: &PagingRequest,
        ) -> Result<ResultPage<Anime>, RepositoryError> {
            std::future::pending().await
        }

        async fn find_by_id(&self, _: AnimeId) -> Result<Option<Anime>, RepositoryError> {
            std::future::pending().await
        }

        async fn save(&self, _: &NewAnime) -> Result<Anime, RepositoryError> {
            std::future::pending().await
        }

        async fn delete(&self, _: &Anime) -> Result<(), RepositoryError> {
            std::future::pending().await
        }

        async fn update_name(&self, _: AnimeId, _: &str) -> Result<Option<Anime>, RepositoryError> {
            std::future::pending().await
        }

        async fn ping(&self) -> Result<(), RepositoryError> {
            std::future::pending().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_query_times_out() {
        let repo = TimedAnimeRepository::new(Arc::new(StalledRepository), Duration::from_millis(2000));

        let result = repo.fetch_all(&PagingRequest::of_size(5)).await;

        assert!(matches!(result, Err(RepositoryError::Timeout(2000))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_ping_times_out() {
        let repo = TimedAnimeRepository::new(Arc::new(StalledRepository), Duration::from_millis(50));

        assert!(matches!(repo.ping().await, Err(RepositoryError::Timeout(50))));
    }

    #[tokio::test]
    async fn test_fast_calls_pass_through() {
        let inner = Arc::new(InMemoryAnimeRepository::with_names(["naruto", "bleach"]));
        let repo = TimedAnimeRepository::new(inner, Duration::from_secs(2));

        let page = repo.fetch_all(&PagingRequest::of_size(5)).await.unwrap();
        assert_eq!(page.total_elements, 2);

        let saved = repo.save(&NewAnime::new("one piece")).await.unwrap();
        assert_eq!(saved.name(), "one piece");
    }

    #[tokio::test]
    async fn test_inner_errors_are_kept() {
        let mut mock_repo = MockAnimeRepository::new();
        mock_repo
            .expect_find_by_id()
            .times(1)
            .returning(|_| Err(RepositoryError::Internal("boom".to_string())));

        let repo = TimedAnimeRepository::new(Arc::new(mock_repo), Duration::from_secs(2));
        let result = repo.find_by_id(AnimeId::from_db(1)).await;

        assert!(matches!(result, Err(RepositoryError::Internal(_))));
    }
}
