//! Query string normalization.
//!
//! Handlers extract the raw query as ordered pairs and normalize it
//! here before anything reaches the query engine: multi-value
//! parameters may arrive repeated (`country=a&country=b`),
//! comma-separated (`country=a,b`), or mixed, and scalar parameters
//! fall back to their defaults instead of erroring.

use crate::dataset::parse_date;
use crate::query::{clamp_limit, clamp_offset, FilterSpec, SortDir, SortField};
use std::collections::HashSet;

/// Raw query pairs in request order.
#[derive(Debug, Clone, Default)]
pub struct QueryPairs(Vec<(String, String)>);

impl QueryPairs {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    /// First value for `key`, if present.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Union of all values for `key`: every occurrence is comma-split,
    /// trimmed, lowercased, and empties dropped.
    pub fn set(&self, key: &str) -> HashSet<String> {
        self.0
            .iter()
            .filter(|(k, _)| k == key)
            .flat_map(|(_, v)| v.split(','))
            .map(|part| part.trim().to_lowercase())
            .filter(|part| !part.is_empty())
            .collect()
    }

    /// First value parsed as an integer; absent or unparseable is `None`.
    pub fn int(&self, key: &str) -> Option<i64> {
        self.first(key).and_then(|v| v.trim().parse().ok())
    }

    /// Flag that defaults to true: only the exact value `true` (or an
    /// absent parameter) is true, anything else is false.
    pub fn flag_default_true(&self, key: &str) -> bool {
        self.first(key).map(|v| v == "true").unwrap_or(true)
    }
}

/// Build the filter spec for the listing and stats endpoints.
pub fn filter_spec(pairs: &QueryPairs) -> FilterSpec {
    FilterSpec {
        query: pairs.first("q").unwrap_or("").to_lowercase(),
        countries: pairs.set("country"),
        labels: pairs.set("label"),
        genders: pairs.set("gender"),
        start: pairs.first("start").and_then(parse_date),
        end: pairs.first("end").and_then(parse_date),
        include_undated: pairs.flag_default_true("includeUndated"),
    }
}

/// Effective sort field and direction, falling back to the defaults on
/// unknown values. The effective pair is echoed in the response.
pub fn sort_spec(pairs: &QueryPairs) -> (SortField, SortDir) {
    let field = pairs
        .first("sortBy")
        .and_then(SortField::parse)
        .unwrap_or_default();
    let dir = pairs
        .first("sortDir")
        .and_then(SortDir::parse)
        .unwrap_or_default();
    (field, dir)
}

/// Effective clamped offset and limit.
pub fn page_spec(pairs: &QueryPairs) -> (usize, usize) {
    (
        clamp_offset(pairs.int("offset")),
        clamp_limit(pairs.int("limit")),
    )
}
