use crate::application::ports::{sort_column, RepositoryError};
use crate::domain::value_objects::PagingRequest;

/// Common SQL query fragments to reduce duplication and ensure consistency
pub struct QueryBuilder;

impl QueryBuilder {
    /// Base SELECT clause for anime queries
    pub const ANIME_SELECT: &'static str = "SELECT id, name FROM animes";

    /// Base COUNT clause for anime queries
    pub const ANIME_COUNT: &'static str = "SELECT COUNT(*) FROM animes";

    /// Build the ORDER BY clause; only sortable columns ever reach the SQL text
    pub fn order_by(paging: &PagingRequest) -> Result<String, RepositoryError> {
        if paging.sort.is_empty() {
            return Ok("ORDER BY id ASC".to_string());
        }

        let mut terms = Vec::with_capacity(paging.sort.len());
        for order in &paging.sort {
            let column = sort_column(&order.field)?;
            terms.push(format!("{} {}", column, order.direction.as_sql()));
        }
        Ok(format!("ORDER BY {}", terms.join(", ")))
    }

    /// `LIKE` pattern matching `text` anywhere, with wildcards escaped
    pub fn contains_pattern(text: &str) -> String {
        let mut pattern = String::with_capacity(text.len() + 2);
        pattern.push('%');
        for c in text.chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::SortOrder;

    #[test]
    fn test_order_by_defaults_to_id() {
        let sql = QueryBuilder::order_by(&PagingRequest::of_size(5)).unwrap();
        assert_eq!(sql, "ORDER BY id ASC");
    }

    #[test]
    fn test_order_by_keeps_sequence() {
        let paging = PagingRequest::of_size(5)
            .with_sort(SortOrder::desc("name"))
            .with_sort(SortOrder::asc("id"));
        let sql = QueryBuilder::order_by(&paging).unwrap();
        assert_eq!(sql, "ORDER BY name DESC, id ASC");
    }

    #[test]
    fn test_order_by_rejects_unknown_field() {
        let paging = PagingRequest::of_size(5).with_sort(SortOrder::asc("name; DROP TABLE animes"));
        let result = QueryBuilder::order_by(&paging);
        assert!(matches!(result, Err(RepositoryError::UnsupportedSortField(_))));
    }

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(QueryBuilder::contains_pattern("ar"), "%ar%");
        assert_eq!(QueryBuilder::contains_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(QueryBuilder::contains_pattern("a\\b"), "%a\\\\b%");
    }
}
