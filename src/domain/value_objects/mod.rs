mod anime_id;
mod paging;
mod result_page;

pub use anime_id::AnimeId;
pub use paging::{PagingRequest, SortDirection, SortOrder};
pub use result_page::ResultPage;
