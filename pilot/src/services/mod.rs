mod search;
mod summary;

pub use search::{SearchResults, SearchService};
pub use summary::{SummaryService, SUMMARY_EMPTY, SUMMARY_FALLBACK};
