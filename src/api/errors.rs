use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::middleware::validation::FieldError;
use crate::application::errors::AnimeServiceError;
use crate::application::ports::RepositoryError;

/// Body of every error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    pub title: String,
    pub status: u16,
    pub details: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub field_errors: Vec<FieldError>,
}

/// API error response
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    title: &'static str,
    message: String,
    field_errors: Vec<FieldError>,
}

impl ApiError {
    pub fn new(status: StatusCode, title: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            title,
            message: message.into(),
            field_errors: Vec::new(),
        }
    }

    /// 400 carrying one entry per rejected field
    pub fn invalid_fields(field_errors: Vec<FieldError>) -> Self {
        let fields: Vec<&str> = field_errors.iter().map(|e| e.field.as_str()).collect();
        let message = format!("invalid fields: {}", fields.join(", "));
        Self {
            field_errors,
            ..Self::new(StatusCode::BAD_REQUEST, "bad request, invalid fields", message)
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "bad request, check the documentation",
            message,
        )
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "resource not found", message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "storage did not answer in time",
            message,
        )
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "unexpected error", message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = self.status.as_u16(), "{}", self.message);
        } else {
            tracing::warn!(status = self.status.as_u16(), "{}", self.message);
        }

        let body = ErrorBody {
            error: self
                .status
                .canonical_reason()
                .unwrap_or("Error")
                .to_string(),
            title: self.title.to_string(),
            status: self.status.as_u16(),
            details: self.message,
            timestamp: chrono::Utc::now().to_rfc3339(),
            field_errors: self.field_errors,
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection.status() {
            status @ (StatusCode::PAYLOAD_TOO_LARGE | StatusCode::UNSUPPORTED_MEDIA_TYPE) => {
                ApiError::new(status, "request body refused", rejection.body_text())
            }
            _ => ApiError::bad_request(rejection.body_text()),
        }
    }
}

impl From<AnimeServiceError> for ApiError {
    fn from(err: AnimeServiceError) -> Self {
        match err {
            AnimeServiceError::InvalidInput(msg) => ApiError::bad_request(msg),
            AnimeServiceError::InvalidResult(e) => ApiError::bad_request(e.to_string()),
            AnimeServiceError::NotFound(msg) => ApiError::not_found(msg),
            AnimeServiceError::Repository(RepositoryError::Timeout(ms)) => {
                ApiError::service_unavailable(format!("query exceeded {} ms", ms))
            }
            AnimeServiceError::Repository(RepositoryError::UnsupportedSortField(field)) => {
                ApiError::bad_request(format!("unsupported sort field: {}", field))
            }
            // Database details stay in the logs
            AnimeServiceError::Repository(e) => {
                tracing::error!("Repository failure: {}", e);
                ApiError::internal_error("repository error")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::hardening::InvalidResultError;

    #[test]
    fn test_service_error_mapping() {
        let cases = [
            (
                AnimeServiceError::InvalidInput("invalid name".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AnimeServiceError::InvalidResult(InvalidResultError::MissingPage),
                StatusCode::BAD_REQUEST,
            ),
            (
                AnimeServiceError::NotFound("anime 1".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (
                AnimeServiceError::Repository(RepositoryError::Timeout(2000)),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AnimeServiceError::Repository(RepositoryError::Internal("x".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status(), expected);
        }
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let err = ApiError::from(AnimeServiceError::Repository(RepositoryError::Internal(
            "password=secret".to_string(),
        )));
        assert!(!err.message().contains("secret"));
    }

    #[test]
    fn test_response_status() {
        let response = ApiError::not_found("anime 3").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
