//! Text helpers for comparing free-form labels (categories, tags).

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Separators used when a single category string carries several labels,
/// e.g. `"Bakery • Café"` or `"Food, Drink"`.
const MULTI_VALUE_SEPARATORS: &[char] = &['•', ',', '/', '|'];

/// Folds a label for comparison: NFD, combining marks dropped, lower-cased, trimmed.
pub fn normalize(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .trim()
        .to_string()
}

/// Splits a multi-value label into its trimmed, non-empty parts.
pub fn split_multi(s: &str) -> Vec<&str> {
    s.split(MULTI_VALUE_SEPARATORS)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_diacritics_and_case() {
        assert_eq!(normalize("  Café "), "cafe");
        assert_eq!(normalize("Deb’s CAFÉ"), "deb’s cafe");
        assert_eq!(normalize("Crème Brûlée"), "creme brulee");
    }

    #[test]
    fn split_multi_handles_every_separator() {
        assert_eq!(split_multi("Bakery • Café"), vec!["Bakery", "Café"]);
        assert_eq!(split_multi("Food, Drink"), vec!["Food", "Drink"]);
        assert_eq!(split_multi("Parks/Trails | Nature"), vec!["Parks", "Trails", "Nature"]);
        assert_eq!(split_multi(" , Food ,"), vec!["Food"]);
        assert!(split_multi("").is_empty());
    }
}
