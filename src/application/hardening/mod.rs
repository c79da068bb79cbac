//! Request and response hardening
//!
//! Two independent stages protect the data layer and the caller:
//!
//! - on entry, [`PageRequestGuard`] turns raw paging input into a bounded,
//!   allow-listed descriptor and never fails;
//! - on exit, [`ResultPageGuard`] rejects structurally impossible pages and
//!   sanitizes every item, so markup that reached storage through some other
//!   path still cannot leave the service.
//!
//! Both stages share one [`PagingPolicy`]. Free text goes through the
//! stateless functions in [`sanitizer`].

pub mod config;
pub mod page_request_guard;
pub mod result_page_guard;
pub mod sanitizer;


pub use config::PagingPolicy;
pub use page_request_guard::PageRequestGuard;
pub use result_page_guard::{InvalidResultError, ResultPageGuard};
pub use sanitizer::{
    sanitize, sanitize_record, sanitize_text, SanitizeRecord, INVALID_TEXT_MARKER, MAX_TEXT_LEN,
};
