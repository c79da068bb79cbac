use serde::{Deserialize, Serialize};

use crate::domain::value_objects::AnimeId;

/// Anime aggregate - a persisted catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anime {
    id: AnimeId,
    name: String,
}

impl Anime {
    /// Columns that are indexed and may appear in an ORDER BY.
    ///
    /// Paging policy and repositories both read this list; it is the single
    /// source of truth for what a caller may sort by.
    pub const SORTABLE_FIELDS: &'static [&'static str] = &["id", "name"];

    /// Maximum stored name length, mirrors `VARCHAR(100)`
    pub const MAX_NAME_LENGTH: usize = 100;

    /// Reconstruct from storage
    pub fn reconstruct(id: AnimeId, name: String) -> Self {
        Self { id, name }
    }

    pub fn id(&self) -> AnimeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, name: String) {
        self.name = name;
    }
}

/// An anime that has not been persisted yet (no identifier assigned)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAnime {
    pub name: String,
}

impl NewAnime {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
