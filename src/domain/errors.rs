use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid anime ID: {0}")]
    InvalidAnimeId(String),

    #[error("Invalid sort direction: {0}")]
    InvalidSortDirection(String),
}
