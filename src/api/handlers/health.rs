use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use utoipa::ToSchema;

use crate::application::errors::AnimeServiceError;
use crate::application::ports::RepositoryError;
use crate::application::use_cases::AnimeQueryService;

/// Basic health check response
#[derive(serde::Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Storage readiness response
#[derive(serde::Serialize, ToSchema)]
pub struct ReadinessResponse {
    pub status: String,
    pub service: String,
    pub database: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /health
/// Basic health check endpoint (no database check)
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_handler() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}

/// GET /health/ready
/// Readiness probe with storage connectivity check
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    responses(
        (status = 200, description = "Service is ready", body = ReadinessResponse),
        (status = 503, description = "Service is not ready", body = ReadinessResponse)
    )
)]
pub async fn readiness_handler(
    State(service): State<Arc<AnimeQueryService>>,
) -> (StatusCode, Json<serde_json::Value>) {
    let start_time = Instant::now();
    let check = service.ping().await;
    let response_time = start_time.elapsed();

    let (status, database, error) = match check {
        Ok(()) => (StatusCode::OK, "connected", None),
        Err(AnimeServiceError::Repository(RepositoryError::Timeout(ms))) => (
            StatusCode::SERVICE_UNAVAILABLE,
            "timeout",
            Some(format!("Storage did not answer within {} ms", ms)),
        ),
        Err(e) => {
            tracing::error!("Readiness check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "disconnected",
                Some("Storage unavailable".to_string()),
            )
        }
    };

    let mut body = json!({
        "status": if status == StatusCode::OK { "ready" } else { "not_ready" },
        "service": env!("CARGO_PKG_NAME"),
        "database": database,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "response_time_ms": response_time.as_millis(),
    });
    if let Some(error) = error {
        body["error"] = json!(error);
    }

    (status, Json(body))
}
