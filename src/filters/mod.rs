//! Match-category filtering of search results

pub mod apply;
pub mod match_type;

pub use apply::{count_by_match_type, filter_results};
pub use match_type::MatchTypeFilter;
