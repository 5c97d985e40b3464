use std::collections::BTreeSet;

use crate::models::MatchType;

/// The set of match categories currently shown.
///
/// Starts with every category active. Iteration follows the canonical category order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchTypeFilter {
    active: BTreeSet<MatchType>,
}

impl MatchTypeFilter {
    /// All categories active
    pub fn all() -> Self {
        Self { active: MatchType::ALL.into_iter().collect() }
    }

    pub fn none() -> Self {
        Self { active: BTreeSet::new() }
    }

    pub fn only(match_types: impl IntoIterator<Item = MatchType>) -> Self {
        Self { active: match_types.into_iter().collect() }
    }

    /// Adds the category if absent, removes it if present
    pub fn toggle(&mut self, match_type: MatchType) {
        if !self.active.remove(&match_type) {
            self.active.insert(match_type);
        }
    }

    pub fn select_all(&mut self) {
        self.active = MatchType::ALL.into_iter().collect();
    }

    pub fn select_none(&mut self) {
        self.active.clear();
    }

    pub fn is_active(&self, match_type: MatchType) -> bool {
        self.active.contains(&match_type)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn shows_everything(&self) -> bool {
        self.active.len() == MatchType::ALL.len()
    }

    pub fn active(&self) -> impl Iterator<Item = MatchType> + '_ {
        self.active.iter().copied()
    }
}

impl Default for MatchTypeFilter {
    fn default() -> Self {
        Self::all()
    }
}
