/// Type-ahead suggestions over the in-memory catalog.
///
/// Plain substring matching on lower-cased text: a title hit scores 3, any tag hit 2, a
/// description hit 1. Zero-score gems are dropped and ties keep catalog order.
use crate::model::{Gem, Suggestion};

pub const DEFAULT_SUGGESTION_LIMIT: usize = 8;

const TITLE_WEIGHT: u32 = 3;
const TAG_WEIGHT: u32 = 2;
const DESCRIPTION_WEIGHT: u32 = 1;

/// `query` must already be trimmed and lower-cased.
fn score(gem: &Gem, query: &str) -> u32 {
    let mut score = 0;
    if gem.title.to_lowercase().contains(query) {
        score += TITLE_WEIGHT;
    }
    if gem.tags.iter().any(|t| t.to_lowercase().contains(query)) {
        score += TAG_WEIGHT;
    }
    if gem.description.to_lowercase().contains(query) {
        score += DESCRIPTION_WEIGHT;
    }
    score
}

/// Returns at most `limit` suggestions for `query`.
///
/// An empty (or whitespace-only) query browses: the first `limit` gems in catalog order.
pub fn suggest(gems: &[Gem], query: &str, limit: usize) -> Vec<Suggestion> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return gems.iter().take(limit).map(Suggestion::from).collect();
    }

    let mut scored: Vec<(u32, &Gem)> = gems
        .iter()
        .map(|g| (score(g, &query), g))
        .filter(|(s, _)| *s > 0)
        .collect();
    // sort_by is stable, so equal scores stay in catalog order.
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored
        .into_iter()
        .take(limit)
        .map(|(_, g)| Suggestion::from(g))
        .collect()
}
