use thiserror::Error;

use super::config::PagingPolicy;
use super::sanitizer::SanitizeRecord;
use crate::domain::value_objects::ResultPage;

/// A page handed back by storage that cannot be correct
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidResultError {
    #[error("page null!!")]
    MissingPage,

    #[error("Invalid page size: {size}. Must be between 1 and {max}")]
    PageSizeOutOfRange { size: i64, max: i64 },

    #[error("Invalid page number: {0}. Cannot be negative")]
    NegativePageNumber(i64),

    #[error("Page holds {items} items but its size is {size}")]
    TooManyItems { items: usize, size: i64 },
}

/// Exit guard for paged results
#[derive(Debug, Clone)]
pub struct ResultPageGuard {
    max_page_size: i64,
}

impl Default for ResultPageGuard {
    fn default() -> Self {
        Self::new(&PagingPolicy::default())
    }
}

impl ResultPageGuard {
    pub fn new(policy: &PagingPolicy) -> Self {
        Self {
            max_page_size: policy.max_page_size,
        }
    }

    /// Validate the page shape and return a new page of sanitized copies
    pub fn guard<T: SanitizeRecord>(
        &self,
        page: Option<ResultPage<T>>,
    ) -> Result<ResultPage<T>, InvalidResultError> {
        let page = page.ok_or(InvalidResultError::MissingPage)?;

        if page.page_size < 1 || page.page_size > self.max_page_size {
            return Err(InvalidResultError::PageSizeOutOfRange {
                size: page.page_size,
                max: self.max_page_size,
            });
        }

        if page.page_number < 0 {
            return Err(InvalidResultError::NegativePageNumber(page.page_number));
        }

        if page.items.len() as i64 > page.page_size {
            return Err(InvalidResultError::TooManyItems {
                items: page.items.len(),
                size: page.page_size,
            });
        }

        if !page.has_content() {
            return Ok(page);
        }

        Ok(page.map_items(|item| item.sanitized()))
    }
}
