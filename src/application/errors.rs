//! Error type shared by the anime use cases

use thiserror::Error;

use crate::application::hardening::InvalidResultError;
use crate::application::ports::RepositoryError;

/// Failures of [`AnimeQueryService`](crate::application::use_cases::AnimeQueryService)
#[derive(Debug, Error)]
pub enum AnimeServiceError {
    /// Caller-supplied data failed validation or sanitization
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Storage returned a page that cannot be correct
    #[error("Invalid result: {0}")]
    InvalidResult(#[from] InvalidResultError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_invalid_result_error() {
        let err: AnimeServiceError = InvalidResultError::MissingPage.into();

        assert!(matches!(err, AnimeServiceError::InvalidResult(_)));
        assert!(err.to_string().contains("page null!!"));
    }

    #[test]
    fn test_from_repository_error() {
        let err: AnimeServiceError = RepositoryError::Timeout(2000).into();

        assert!(matches!(err, AnimeServiceError::Repository(_)));
        assert!(err.to_string().contains("Repository error"));
        assert!(err.to_string().contains("2000"));
    }

    #[test]
    fn test_invalid_input_display() {
        let err = AnimeServiceError::InvalidInput("invalid name".to_string());

        assert!(err.to_string().contains("Invalid input"));
        assert!(err.to_string().contains("invalid name"));
    }

    #[test]
    fn test_not_found_display() {
        let err = AnimeServiceError::NotFound("anime 9".to_string());

        assert!(err.to_string().contains("Not found"));
        assert!(format!("{:?}", err).contains("NotFound"));
    }
}
