use tracing::debug;

use super::config::PagingPolicy;
use super::sanitizer::sanitize_text;
use crate::domain::value_objects::{PagingRequest, SortOrder};

/// Entry guard for paging input.
///
/// Paging parameters are advisory: anything out of bounds degrades to a safe
/// value instead of being rejected, so `guard` is total.
#[derive(Debug, Clone, Default)]
pub struct PageRequestGuard {
    policy: PagingPolicy,
}

impl PageRequestGuard {
    pub fn new(policy: PagingPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &PagingPolicy {
        &self.policy
    }

    /// Clamp page size and number and reduce the sort to allow-listed fields
    pub fn guard(&self, request: &PagingRequest) -> PagingRequest {
        PagingRequest {
            page_number: self.safe_page_number(request.page_number),
            page_size: self.safe_page_size(request.page_size),
            sort: self.safe_sort(&request.sort),
        }
    }

    /// Clamp page size and number only; the sort is passed through as given.
    ///
    /// Strictly weaker than [`guard`](Self::guard). Only for call sites whose
    /// sort keys are already trusted.
    pub fn quick_guard(&self, request: &PagingRequest) -> PagingRequest {
        PagingRequest {
            page_number: self.safe_page_number(request.page_number),
            page_size: self.safe_page_size(request.page_size),
            sort: request.sort.clone(),
        }
    }

    pub fn is_sort_field_allowed(&self, field: &str) -> bool {
        self.policy.is_sort_field_allowed(field)
    }

    pub fn allowed_sort_fields(&self) -> impl Iterator<Item = &str> {
        self.policy.allowed_sort_fields.iter().map(String::as_str)
    }

    pub fn max_page_size(&self) -> i64 {
        self.policy.max_page_size
    }

    fn safe_page_size(&self, requested: i64) -> i64 {
        if requested <= 0 {
            return self.policy.default_page_size;
        }
        requested.min(self.policy.max_page_size)
    }

    fn safe_page_number(&self, requested: i64) -> i64 {
        requested.max(self.policy.default_page_number)
    }

    fn safe_sort(&self, requested: &[SortOrder]) -> Vec<SortOrder> {
        if requested.is_empty() {
            return self.default_sort();
        }

        // Field names are sanitized after the allow-list check as well.
        let safe: Vec<SortOrder> = requested
            .iter()
            .filter(|order| self.policy.is_sort_field_allowed(&order.field))
            .map(|order| SortOrder {
                field: sanitize_text(&order.field),
                direction: order.direction,
            })
            .collect();

        if safe.len() < requested.len() {
            debug!(
                dropped = requested.len() - safe.len(),
                "Dropped sort keys outside the allow-list"
            );
        }

        if safe.is_empty() {
            return self.default_sort();
        }
        safe
    }

    fn default_sort(&self) -> Vec<SortOrder> {
        vec![SortOrder::asc(self.policy.default_sort_field.clone())]
    }
}
