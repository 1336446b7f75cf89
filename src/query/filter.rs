//! Declarative record filtering.
//!
//! A [`FilterSpec`] is built once per request from the normalized query
//! parameters and applied as a predicate chain. Set-valued filters use
//! OR semantics within the set and AND semantics across predicates.

use crate::models::Release;
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// All filter criteria for one request.
///
/// Text in `query` and the sets is expected lowercased; the boundary
/// layer does that when it builds the spec. The default spec keeps
/// every record, matching the API defaults (undated included).
#[derive(Debug, Clone)]
pub struct FilterSpec {
    /// Substring match against the artist name, case-insensitive.
    /// Empty means no constraint.
    pub query: String,
    /// Accepted country values (raw cell spelling, lowercased).
    pub countries: HashSet<String>,
    /// Accepted label values, lowercased.
    pub labels: HashSet<String>,
    /// Accepted gender values, lowercased.
    pub genders: HashSet<String>,
    /// Inclusive lower date bound.
    pub start: Option<DateTime<Utc>>,
    /// Inclusive upper date bound.
    pub end: Option<DateTime<Utc>>,
    /// Whether records without a date pass the date predicate.
    pub include_undated: bool,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            query: String::new(),
            countries: HashSet::new(),
            labels: HashSet::new(),
            genders: HashSet::new(),
            start: None,
            end: None,
            include_undated: true,
        }
    }
}

impl FilterSpec {
    /// Evaluate the predicate chain against one record.
    pub fn matches(&self, rec: &Release) -> bool {
        if !self.query.is_empty() && !rec.artist.to_lowercase().contains(&self.query) {
            return false;
        }

        if !self.countries.is_empty() && !self.countries.contains(&rec.country.to_lowercase()) {
            return false;
        }

        if !self.labels.is_empty()
            && !self
                .labels
                .contains(&rec.label.as_deref().unwrap_or("").to_lowercase())
        {
            return false;
        }

        if !self.genders.is_empty()
            && !self
                .genders
                .contains(&rec.gender.as_deref().unwrap_or("").to_lowercase())
        {
            return false;
        }

        // Undated records bypass the range check entirely; the policy
        // flag alone decides their fate.
        let date = match rec.date {
            Some(d) => d,
            None => return self.include_undated,
        };

        if let Some(start) = self.start {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if date > end {
                return false;
            }
        }

        true
    }

    /// Filter a dataset, preserving input order.
    pub fn apply<'a>(&self, records: &'a [Release]) -> Vec<&'a Release> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}
