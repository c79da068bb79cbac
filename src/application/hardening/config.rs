use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::entities::Anime;

/// Limits applied to paging input and paged output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingPolicy {
    /// Upper bound for a page size
    pub max_page_size: i64,
    /// Page size used when the caller asks for a non-positive one
    pub default_page_size: i64,
    /// Lowest page number handed to storage
    pub default_page_number: i64,
    /// Fields a caller may sort by
    pub allowed_sort_fields: BTreeSet<String>,
    /// Field used when no usable sort key remains
    pub default_sort_field: String,
}

impl Default for PagingPolicy {
    fn default() -> Self {
        Self {
            max_page_size: 50,
            default_page_size: 5,
            default_page_number: 0,
            allowed_sort_fields: Anime::SORTABLE_FIELDS
                .iter()
                .map(|f| f.to_string())
                .collect(),
            default_sort_field: "id".to_string(),
        }
    }
}

impl PagingPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum page size
    pub fn with_max_page_size(mut self, size: i64) -> Self {
        self.max_page_size = size;
        self
    }

    /// Set the default page size
    pub fn with_default_page_size(mut self, size: i64) -> Self {
        self.default_page_size = size;
        self
    }

    /// Replace the sort allow-list
    pub fn with_allowed_sort_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_sort_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_sort_field_allowed(&self, field: &str) -> bool {
        self.allowed_sort_fields.contains(field)
    }

    /// Check the policy is internally consistent
    pub fn validate(&self) -> Result<(), String> {
        if self.max_page_size < 1 {
            return Err("max page size must be at least 1".to_string());
        }
        if self.default_page_size < 1 || self.default_page_size > self.max_page_size {
            return Err(format!(
                "default page size must be between 1 and {}",
                self.max_page_size
            ));
        }
        if self.default_page_number < 0 {
            return Err("default page number cannot be negative".to_string());
        }
        if !self.is_sort_field_allowed(&self.default_sort_field) {
            return Err(format!(
                "default sort field '{}' is not in the allow-list",
                self.default_sort_field
            ));
        }
        Ok(())
    }
}
