use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;

use crate::api::handlers::{health_handler, readiness_handler};
use crate::application::ports::{MockAnimeRepository, RepositoryError};
use crate::application::use_cases::AnimeQueryService;

#[tokio::test]
async fn test_health_handler() {
    let (status, body) = health_handler().await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.0["status"], "healthy");
}

#[tokio::test]
async fn test_readiness_when_storage_answers() {
    let mut mock_repo = MockAnimeRepository::new();
    mock_repo.expect_ping().times(1).returning(|| Ok(()));
    let service = Arc::new(AnimeQueryService::new(Arc::new(mock_repo)));

    let (status, body) = readiness_handler(State(service)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.0["status"], "ready");
    assert_eq!(body.0["database"], "connected");
    assert!(body.0.get("error").is_none());
}

#[tokio::test]
async fn test_readiness_when_storage_times_out() {
    let mut mock_repo = MockAnimeRepository::new();
    mock_repo
        .expect_ping()
        .times(1)
        .returning(|| Err(RepositoryError::Timeout(2000)));
    let service = Arc::new(AnimeQueryService::new(Arc::new(mock_repo)));

    let (status, body) = readiness_handler(State(service)).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body.0["database"], "timeout");
}

#[tokio::test]
async fn test_readiness_hides_database_details() {
    let mut mock_repo = MockAnimeRepository::new();
    mock_repo
        .expect_ping()
        .times(1)
        .returning(|| Err(RepositoryError::Internal("host=10.0.0.3".to_string())));
    let service = Arc::new(AnimeQueryService::new(Arc::new(mock_repo)));

    let (status, body) = readiness_handler(State(service)).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body.0["status"], "not_ready");
    assert!(!body.0["error"].as_str().unwrap().contains("10.0.0.3"));
}
