use super::match_type::MatchTypeFilter;
use crate::models::{MatchType, SearchResult};

/// Keeps the results whose category is active, preserving their order.
///
/// Looks only at the category tag; snippet text plays no part.
pub fn filter_results(results: Vec<SearchResult>, filter: &MatchTypeFilter) -> Vec<SearchResult> {
    if filter.shows_everything() {
        return results;
    }

    results.into_iter().filter(|result| filter.is_active(result.match_type)).collect()
}

/// Number of results per category, in canonical category order
pub fn count_by_match_type(results: &[SearchResult]) -> Vec<(MatchType, usize)> {
    MatchType::ALL
        .into_iter()
        .map(|match_type| {
            (match_type, results.iter().filter(|r| r.match_type == match_type).count())
        })
        .collect()
}
