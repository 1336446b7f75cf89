//! Aggregation over a filtered record set.
//!
//! Produces the grouped counts behind `/release-stats`: top artists,
//! top countries, and gender buckets. Aggregation always runs over the
//! whole filtered set, independent of any pagination.

use crate::models::Release;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How many entries the top lists carry.
pub const TOP_N: usize = 5;

// =============================================================================
// Output Types
// =============================================================================

/// One grouped count, e.g. an artist and their release count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

/// Release counts per gender bucket.
///
/// Buckets match on the exact lowercased value: `male`/`m`,
/// `female`/`f`, and everything else (including absent) as `other`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderCounts {
    pub male: usize,
    pub female: usize,
    pub other: usize,
}

impl GenderCounts {
    /// Sum over all buckets; always equals the aggregated total.
    pub fn sum(&self) -> usize {
        self.male + self.female + self.other
    }
}

/// Full aggregation result for one filtered set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    /// Size of the filtered set.
    pub total: usize,
    pub top_artists: Vec<LabelCount>,
    pub top_countries: Vec<LabelCount>,
    pub gender_counts: GenderCounts,
}

// =============================================================================
// Aggregation
// =============================================================================

/// Aggregate a filtered record set.
pub fn aggregate(records: &[&Release]) -> Aggregation {
    let mut by_artist = OrderedCounter::new();
    let mut by_country = OrderedCounter::new();
    let mut genders = GenderCounts::default();

    for rec in records {
        by_artist.add(&rec.artist);

        let country = if rec.country.is_empty() {
            "Unknown"
        } else {
            rec.country.as_str()
        };
        by_country.add(country);

        match rec
            .gender
            .as_deref()
            .unwrap_or("")
            .trim()
            .to_lowercase()
            .as_str()
        {
            "male" | "m" => genders.male += 1,
            "female" | "f" => genders.female += 1,
            _ => genders.other += 1,
        }
    }

    Aggregation {
        total: records.len(),
        top_artists: by_artist.into_top(TOP_N),
        top_countries: by_country.into_top(TOP_N),
        gender_counts: genders,
    }
}

/// Counter that remembers first-encounter order of its keys, so that
/// equal counts rank in dataset order after the stable sort.
struct OrderedCounter {
    index: HashMap<String, usize>,
    entries: Vec<(String, usize)>,
}

impl OrderedCounter {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    fn add(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), 1));
            }
        }
    }

    fn into_top(self, n: usize) -> Vec<LabelCount> {
        let mut entries = self.entries;
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.truncate(n);
        entries
            .into_iter()
            .map(|(label, count)| LabelCount { label, count })
            .collect()
    }
}
