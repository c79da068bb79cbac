use serde::{Deserialize, Serialize};

/// One page of results as produced by a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultPage<T> {
    pub items: Vec<T>,
    pub page_number: i64,
    pub page_size: i64,
    pub total_elements: u64,
}

impl<T> ResultPage<T> {
    pub fn new(items: Vec<T>, page_number: i64, page_size: i64, total_elements: u64) -> Self {
        Self {
            items,
            page_number,
            page_size,
            total_elements,
        }
    }

    pub fn empty(page_number: i64, page_size: i64) -> Self {
        Self::new(Vec::new(), page_number, page_size, 0)
    }

    /// `ceil(total_elements / page_size)`, zero for a non-positive page size
    pub fn total_pages(&self) -> u64 {
        if self.page_size <= 0 {
            return 0;
        }
        self.total_elements.div_ceil(self.page_size as u64)
    }

    pub fn has_content(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn number_of_elements(&self) -> usize {
        self.items.len()
    }

    /// Build a page with the same shape holding different items
    pub fn map_items<U>(self, f: impl FnMut(T) -> U) -> ResultPage<U> {
        ResultPage {
            items: self.items.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_elements: self.total_elements,
        }
    }
}
