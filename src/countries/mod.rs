//! Country name canonicalization.
//!
//! Collapses known alias spellings ("UAE", "U.A.E.") to one canonical
//! form for the `/options` country listing. Filtering and aggregation
//! match the raw cell value on purpose: canonicalizing there would
//! change which records historical country filters select.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Alias table, keyed by normalized spelling (lowercased, periods
/// stripped, whitespace collapsed).
static ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("uae", "United Arab Emirates"),
        ("u a e", "United Arab Emirates"),
        ("palestine", "State of Palestine"),
        ("kurdistan", "Iraq"),
    ])
});

/// Resolve a country name to its canonical display form.
///
/// Unknown names pass through trimmed; empty input stays empty.
pub fn canonicalize(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let lowered = trimmed.to_lowercase().replace('.', "");
    let key = WHITESPACE.replace_all(&lowered, " ");

    match ALIASES.get(key.trim()) {
        Some(canonical) => canonical.to_string(),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_alias() {
        assert_eq!(canonicalize("UAE"), "United Arab Emirates");
        assert_eq!(canonicalize("uae"), "United Arab Emirates");
    }

    #[test]
    fn test_periods_stripped() {
        assert_eq!(canonicalize("U.A.E."), "United Arab Emirates");
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(canonicalize("u  a  e"), "United Arab Emirates");
        assert_eq!(canonicalize("  Palestine "), "State of Palestine");
    }

    #[test]
    fn test_regional_alias() {
        assert_eq!(canonicalize("Kurdistan"), "Iraq");
    }

    #[test]
    fn test_unknown_passes_through_trimmed() {
        assert_eq!(canonicalize(" France "), "France");
        assert_eq!(canonicalize("Germany"), "Germany");
    }

    #[test]
    fn test_empty_stays_empty() {
        assert_eq!(canonicalize(""), "");
        assert_eq!(canonicalize("   "), "");
    }
}
