use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::errors::DomainError;

/// Direction of a single sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(DomainError::InvalidSortDirection(s.to_string())),
        }
    }
}

/// One `(field, direction)` sort key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SortOrder {
    pub field: String,
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Parse a `field[,direction]` query value.
    ///
    /// An unknown direction falls back to ascending; the field itself is kept
    /// verbatim so the page guard can decide whether it is allowed.
    pub fn parse_param(param: &str) -> Option<Self> {
        let mut parts = param.splitn(2, ',');
        let field = parts.next()?.trim();
        if field.is_empty() {
            return None;
        }
        let direction = parts
            .next()
            .and_then(|d| d.parse::<SortDirection>().ok())
            .unwrap_or_default();
        Some(Self {
            field: field.to_string(),
            direction,
        })
    }
}

/// Paging descriptor as received from a caller.
///
/// Values are signed on purpose: raw input may be negative and only becomes
/// trustworthy after it went through the page request guard.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct PagingRequest {
    pub page_number: i64,
    pub page_size: i64,
    pub sort: Vec<SortOrder>,
}

impl PagingRequest {
    pub fn new(page_number: i64, page_size: i64) -> Self {
        Self {
            page_number,
            page_size,
            sort: Vec::new(),
        }
    }

    pub fn of_size(page_size: i64) -> Self {
        Self::new(0, page_size)
    }

    pub fn with_sort(mut self, order: SortOrder) -> Self {
        self.sort.push(order);
        self
    }

    /// Row offset of the first item of this page
    pub fn offset(&self) -> i64 {
        self.page_number.saturating_mul(self.page_size)
    }

    pub fn order_for(&self, field: &str) -> Option<&SortOrder> {
        self.sort.iter().find(|o| o.field == field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_order_parse_param() {
        assert_eq!(SortOrder::parse_param("name,desc"), Some(SortOrder::desc("name")));
        assert_eq!(SortOrder::parse_param("id"), Some(SortOrder::asc("id")));
        assert_eq!(SortOrder::parse_param("id,DESC"), Some(SortOrder::desc("id")));
        assert_eq!(SortOrder::parse_param("id,sideways"), Some(SortOrder::asc("id")));
        assert_eq!(SortOrder::parse_param(""), None);
        assert_eq!(SortOrder::parse_param(" ,desc"), None);
    }

    #[test]
    fn test_paging_offset() {
        assert_eq!(PagingRequest::new(0, 5).offset(), 0);
        assert_eq!(PagingRequest::new(3, 5).offset(), 15);
        assert_eq!(PagingRequest::new(i64::MAX, 50).offset(), i64::MAX);
    }

    #[test]
    fn test_order_for() {
        let paging = PagingRequest::of_size(5)
            .with_sort(SortOrder::desc("name"))
            .with_sort(SortOrder::asc("id"));

        assert_eq!(
            paging.order_for("name").map(|o| o.direction),
            Some(SortDirection::Desc)
        );
        assert!(paging.order_for("password").is_none());
    }
}
