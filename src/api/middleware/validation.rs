use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::errors::ApiError;

/// Field error details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Validate a payload, turning every violation into a field error
pub fn validate_and_respond<T>(payload: &T) -> Result<(), ApiError>
where
    T: Validate,
{
    payload.validate().map_err(|validation_errors| {
        let mut field_errors: Vec<FieldError> = validation_errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(|error| FieldError {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|cow| cow.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string()),
                })
            })
            .collect();
        field_errors.sort_by(|a, b| a.field.cmp(&b.field));

        ApiError::invalid_fields(field_errors)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::{CreateAnimeRequest, UpdateAnimeRequest};
    use axum::http::StatusCode;

    #[test]
    fn test_valid_payload_passes() {
        let payload = CreateAnimeRequest {
            name: "naruto".to_string(),
        };
        assert!(validate_and_respond(&payload).is_ok());
    }

    #[test]
    fn test_invalid_payload_lists_fields() {
        let payload = UpdateAnimeRequest {
            id: 0,
            name: String::new(),
        };

        let err = validate_and_respond(&payload).unwrap_err();

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        let fields: Vec<&str> = err.field_errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["id", "name"]);
        assert_eq!(err.field_errors()[0].message, "id must be positive");
    }
}
