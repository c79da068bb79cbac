use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::QueryBuilder;
use crate::application::ports::{AnimeRepository, RepositoryError};
use crate::domain::entities::{Anime, NewAnime};
use crate::domain::value_objects::{AnimeId, PagingRequest, ResultPage};

pub struct PostgresAnimeRepository {
    pool: PgPool,
}

/// Optional name condition of a paged fetch
enum NameFilter<'a> {
    None,
    Contains(&'a str),
    Exact(&'a str),
}

impl NameFilter<'_> {
    fn where_clause(&self) -> &'static str {
        match self {
            NameFilter::None => "",
            NameFilter::Contains(_) => "WHERE name LIKE $1",
            NameFilter::Exact(_) => "WHERE name = $1",
        }
    }

    fn bind_value(&self) -> Option<String> {
        match self {
            NameFilter::None => None,
            NameFilter::Contains(text) => Some(QueryBuilder::contains_pattern(text)),
            NameFilter::Exact(text) => Some(text.to_string()),
        }
    }
}

impl PostgresAnimeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch one page and the total count of matching rows
    async fn fetch_page(
        &self,
        filter: NameFilter<'_>,
        paging: &PagingRequest,
    ) -> Result<ResultPage<Anime>, RepositoryError> {
        let order_by = QueryBuilder::order_by(paging)?;
        let where_clause = filter.where_clause();
        let bind_value = filter.bind_value();
        let (limit_index, offset_index) = if bind_value.is_some() { (2, 3) } else { (1, 2) };

        let sql = format!(
            "{} {} {} LIMIT ${} OFFSET ${}",
            QueryBuilder::ANIME_SELECT,
            where_clause,
            order_by,
            limit_index,
            offset_index
        );
        debug!(%sql, "Fetching anime page");

        let mut query = sqlx::query_as::<_, AnimeRow>(&sql);
        if let Some(value) = &bind_value {
            query = query.bind(value);
        }
        let rows = query
            .bind(paging.page_size)
            .bind(paging.offset())
            .fetch_all(&self.pool)
            .await?;

        let count_sql = format!("{} {}", QueryBuilder::ANIME_COUNT, where_clause);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(value) = &bind_value {
            count_query = count_query.bind(value);
        }
        let total: i64 = count_query.fetch_one(&self.pool).await?;

        Ok(ResultPage::new(
            rows.into_iter().map(AnimeRow::into_domain).collect(),
            paging.page_number,
            paging.page_size,
            total.max(0) as u64,
        ))
    }
}

#[async_trait]
impl AnimeRepository for PostgresAnimeRepository {
    async fn fetch_all(&self, paging: &PagingRequest) -> Result<ResultPage<Anime>, RepositoryError> {
        self.fetch_page(NameFilter::None, paging).await
    }

    async fn fetch_by_substring(
        &self,
        text: &str,
        paging: &PagingRequest,
    ) -> Result<ResultPage<Anime>, RepositoryError> {
        self.fetch_page(NameFilter::Contains(text), paging).await
    }

    async fn fetch_by_exact(
        &self,
        text: &str,
        paging: &PagingRequest,
    ) -> Result<ResultPage<Anime>, RepositoryError> {
        self.fetch_page(NameFilter::Exact(text), paging).await
    }

    async fn find_by_id(&self, id: AnimeId) -> Result<Option<Anime>, RepositoryError> {
        let row = sqlx::query_as::<_, AnimeRow>("SELECT id, name FROM animes WHERE id = $1")
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(AnimeRow::into_domain))
    }

    async fn save(&self, anime: &NewAnime) -> Result<Anime, RepositoryError> {
        let row = sqlx::query_as::<_, AnimeRow>(
            "INSERT INTO animes (name) VALUES ($1) RETURNING id, name",
        )
        .bind(&anime.name)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_domain())
    }

    async fn delete(&self, anime: &Anime) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM animes WHERE id = $1")
            .bind(anime.id().value())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn update_name(&self, id: AnimeId, name: &str) -> Result<Option<Anime>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, AnimeRow>(
            "SELECT id, name FROM animes WHERE id = $1 FOR UPDATE",
        )
        .bind(id.value())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = current else {
            tx.rollback().await?;
            return Ok(None);
        };

        let mut anime = row.into_domain();
        anime.rename(name.to_string());

        sqlx::query("UPDATE animes SET name = $1 WHERE id = $2")
            .bind(anime.name())
            .bind(anime.id().value())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(anime))
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

// Internal row mapping struct
#[derive(sqlx::FromRow)]
struct AnimeRow {
    id: i64,
    name: String,
}

impl AnimeRow {
    fn into_domain(self) -> Anime {
        Anime::reconstruct(AnimeId::from_db(self.id), self.name)
    }
}
