use hiddenpg_common::text::{normalize, split_multi};

use crate::model::Gem;

/// Whether `gem` belongs under the category chip `label`.
///
/// Labels compare case- and diacritic-insensitively against, in order: each part of a
/// multi-value category (`"Bakery • Café"`), the whole category as a substring, then
/// each tag. An empty label matches everything.
pub fn matches_category(gem: &Gem, label: &str) -> bool {
    let wanted = normalize(label);
    if wanted.is_empty() {
        return true;
    }

    if !gem.category.is_empty() {
        if split_multi(&gem.category)
            .into_iter()
            .any(|part| normalize(part) == wanted)
        {
            return true;
        }
        if normalize(&gem.category).contains(&wanted) {
            return true;
        }
    }

    gem.tags.iter().any(|t| normalize(t) == wanted)
}

pub fn filter_by_category<'a>(gems: &'a [Gem], label: &str) -> Vec<&'a Gem> {
    gems.iter().filter(|g| matches_category(g, label)).collect()
}
