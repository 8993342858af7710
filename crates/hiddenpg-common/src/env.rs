//! Environment lookups with hard-coded fallbacks.

use std::str::FromStr;

use crate::error::CommonError;

/// Returns the variable's value, or `default` when it is unset or blank.
pub fn var_or(name: &str, default: &str) -> String {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => default.to_string(),
    }
}

/// Parses the variable into `T`, falling back to `default` when unset or blank.
///
/// A value that is present but unparsable is an error rather than a silent fallback.
pub fn parse_or<T: FromStr>(name: &str, default: T) -> Result<T, CommonError> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => v.trim().parse::<T>().map_err(|_| CommonError::InvalidEnv {
            name: name.to_string(),
            value: v,
        }),
        _ => Ok(default),
    }
}

/// Splits a comma-separated variable into trimmed, non-empty items.
///
/// Unset falls back to `default`; set-but-empty yields an empty list.
pub fn list_or(name: &str, default: &[&str]) -> Vec<String> {
    match std::env::var(name) {
        Ok(v) => split_list(&v),
        Err(_) => default.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_drops_blank_items() {
        assert_eq!(
            split_list(" https://a.example , ,http://localhost:5173,"),
            vec!["https://a.example".to_string(), "http://localhost:5173".to_string()]
        );
        assert!(split_list("").is_empty());
    }

    #[test]
    fn parse_or_rejects_garbage() {
        std::env::set_var("HIDDENPG_TEST_PARSE_OR", "not-a-number");
        let err = parse_or::<u64>("HIDDENPG_TEST_PARSE_OR", 5).unwrap_err();
        assert!(err.to_string().contains("HIDDENPG_TEST_PARSE_OR"));
        std::env::remove_var("HIDDENPG_TEST_PARSE_OR");
        assert_eq!(parse_or::<u64>("HIDDENPG_TEST_PARSE_OR", 5).unwrap(), 5);
    }
}
