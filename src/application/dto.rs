use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::domain::entities::Anime;
use crate::domain::value_objects::ResultPage;

/// Characters accepted in a name search: letters (accented included),
/// digits, whitespace and `-._`
static NAME_QUERY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9áàâãéèêíïóôõöúçñÁÀÂÃÉÈÊÍÏÓÔÕÖÚÇÑ\s\-._]*$")
        .expect("Invalid name query regex")
});

/// DTO for anime responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AnimeDto {
    pub id: i64,
    pub name: String,
}

impl From<Anime> for AnimeDto {
    fn from(anime: Anime) -> Self {
        Self {
            id: anime.id().value(),
            name: anime.name().to_string(),
        }
    }
}

/// DTO for a page of animes
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnimePageResponse {
    pub content: Vec<AnimeDto>,
    pub page_number: i64,
    pub page_size: i64,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number_of_elements: usize,
}

impl From<ResultPage<Anime>> for AnimePageResponse {
    fn from(page: ResultPage<Anime>) -> Self {
        let total_pages = page.total_pages();
        let number_of_elements = page.number_of_elements();
        Self {
            content: page.items.into_iter().map(AnimeDto::from).collect(),
            page_number: page.page_number,
            page_size: page.page_size,
            total_elements: page.total_elements,
            total_pages,
            number_of_elements,
        }
    }
}

/// DTO for create request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateAnimeRequest {
    #[validate(length(min = 1, max = 100, message = "name must have between 1 and 100 characters"))]
    pub name: String,
}

/// DTO for rename request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateAnimeRequest {
    #[validate(range(min = 1, message = "id must be positive"))]
    pub id: i64,
    #[validate(length(min = 1, message = "name cannot be null or empty"))]
    pub name: String,
}

/// Query of the name search endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct FindByNameQuery {
    #[validate(
        length(min = 1, max = 50, message = "name must have between 1 and 50 characters"),
        custom(function = "validate_name_query")
    )]
    pub name: String,
    /// Substring match when true, exact match otherwise
    #[serde(default)]
    pub contains: bool,
}

fn validate_name_query(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("name cannot be blank".into()));
    }
    if !NAME_QUERY_REGEX.is_match(name) {
        return Err(
            ValidationError::new("characters").with_message("invalid characters in name".into()),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::AnimeId;

    #[test]
    fn test_page_response_from_result_page() {
        let page = ResultPage::new(
            vec![
                Anime::reconstruct(AnimeId::from_db(1), "alex".to_string()),
                Anime::reconstruct(AnimeId::from_db(2), "barbara".to_string()),
            ],
            1,
            2,
            5,
        );

        let response = AnimePageResponse::from(page);

        assert_eq!(response.content.len(), 2);
        assert_eq!(response.content[1], AnimeDto { id: 2, name: "barbara".to_string() });
        assert_eq!(response.page_number, 1);
        assert_eq!(response.page_size, 2);
        assert_eq!(response.total_elements, 5);
        assert_eq!(response.total_pages, 3);
        assert_eq!(response.number_of_elements, 2);
    }

    #[test]
    fn test_create_request_validation() {
        assert!(CreateAnimeRequest { name: "naruto".to_string() }.validate().is_ok());
        assert!(CreateAnimeRequest { name: String::new() }.validate().is_err());
        assert!(CreateAnimeRequest { name: "x".repeat(101) }.validate().is_err());
    }

    #[test]
    fn test_update_request_validation() {
        let valid = UpdateAnimeRequest { id: 1, name: "bleach".to_string() };
        assert!(valid.validate().is_ok());

        let bad_id = UpdateAnimeRequest { id: 0, name: "bleach".to_string() };
        assert!(bad_id.validate().is_err());

        let empty_name = UpdateAnimeRequest { id: 3, name: String::new() };
        assert!(empty_name.validate().is_err());
    }

    #[test]
    fn test_find_by_name_query_validation() {
        let ok = FindByNameQuery { name: "Ação - vol.2".to_string(), contains: true };
        assert!(ok.validate().is_ok());

        let markup = FindByNameQuery { name: "<script>".to_string(), contains: false };
        assert!(markup.validate().is_err());

        let blank = FindByNameQuery { name: "   ".to_string(), contains: false };
        assert!(blank.validate().is_err());

        let long = FindByNameQuery { name: "a".repeat(51), contains: false };
        assert!(long.validate().is_err());
    }
}
