use std::cmp::Ordering;
use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::application::ports::{sort_column, AnimeRepository, RepositoryError};
use crate::domain::entities::{Anime, NewAnime};
use crate::domain::value_objects::{AnimeId, PagingRequest, ResultPage, SortDirection};

/// Process-local store, used for tests and local runs without a database
#[derive(Default)]
pub struct InMemoryAnimeRepository {
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    rows: BTreeMap<i64, String>,
    last_id: i64,
}

impl InMemoryAnimeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with raw names, bypassing every guard
    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let repo = Self::new();
        {
            let mut state = repo.state.write();
            for name in names {
                state.last_id += 1;
                let id = state.last_id;
                state.rows.insert(id, name.into());
            }
        }
        repo
    }

    pub fn len(&self) -> usize {
        self.state.read().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().rows.is_empty()
    }

    fn page_of(
        &self,
        paging: &PagingRequest,
        keep: impl Fn(&str) -> bool,
    ) -> Result<ResultPage<Anime>, RepositoryError> {
        let mut columns = Vec::with_capacity(paging.sort.len());
        for order in &paging.sort {
            columns.push((sort_column(&order.field)?, order.direction));
        }

        let mut matching: Vec<Anime> = self
            .state
            .read()
            .rows
            .iter()
            .filter(|(_, name)| keep(name))
            .map(|(id, name)| Anime::reconstruct(AnimeId::from_db(*id), name.clone()))
            .collect();

        matching.sort_by(|a, b| compare(a, b, &columns));

        let total = matching.len() as u64;
        let offset = usize::try_from(paging.offset()).unwrap_or(usize::MAX);
        let size = usize::try_from(paging.page_size).unwrap_or(0);
        let items = matching.into_iter().skip(offset).take(size).collect();

        Ok(ResultPage::new(items, paging.page_number, paging.page_size, total))
    }
}

fn compare(a: &Anime, b: &Anime, columns: &[(&'static str, SortDirection)]) -> Ordering {
    for (column, direction) in columns {
        let ordering = match *column {
            "name" => a.name().cmp(b.name()),
            _ => a.id().value().cmp(&b.id().value()),
        };
        let ordering = match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    a.id().value().cmp(&b.id().value())
}

#[async_trait]
impl AnimeRepository for InMemoryAnimeRepository {
    async fn fetch_all(&self, paging: &PagingRequest) -> Result<ResultPage<Anime>, RepositoryError> {
        self.page_of(paging, |_| true)
    }

    async fn fetch_by_substring(
        &self,
        text: &str,
        paging: &PagingRequest,
    ) -> Result<ResultPage<Anime>, RepositoryError> {
        self.page_of(paging, |name| name.contains(text))
    }

    async fn fetch_by_exact(
        &self,
        text: &str,
        paging: &PagingRequest,
    ) -> Result<ResultPage<Anime>, RepositoryError> {
        self.page_of(paging, |name| name == text)
    }

    async fn find_by_id(&self, id: AnimeId) -> Result<Option<Anime>, RepositoryError> {
        Ok(self
            .state
            .read()
            .rows
            .get(&id.value())
            .map(|name| Anime::reconstruct(id, name.clone())))
    }

    async fn save(&self, anime: &NewAnime) -> Result<Anime, RepositoryError> {
        let mut state = self.state.write();
        state.last_id += 1;
        let id = state.last_id;
        state.rows.insert(id, anime.name.clone());
        Ok(Anime::reconstruct(AnimeId::from_db(id), anime.name.clone()))
    }

    async fn delete(&self, anime: &Anime) -> Result<(), RepositoryError> {
        self.state.write().rows.remove(&anime.id().value());
        Ok(())
    }

    async fn update_name(&self, id: AnimeId, name: &str) -> Result<Option<Anime>, RepositoryError> {
        let mut state = self.state.write();
        match state.rows.get_mut(&id.value()) {
            Some(stored) => {
                *stored = name.to_string();
                Ok(Some(Anime::reconstruct(id, stored.clone())))
            }
            None => Ok(None),
        }
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
