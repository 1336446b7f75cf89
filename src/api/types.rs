//! JSON response types.
//!
//! Wire shapes only: camelCase field names, dates as ISO strings with
//! millisecond precision, `null` for undated. Domain types stay in
//! [`crate::models`] and [`crate::stats`].

use crate::models::Release;
use crate::stats::{Aggregation, GenderCounts, LabelCount};
use crate::summary::SummaryRow;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// One listed release.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseRow {
    pub artist: String,
    pub release: String,
    pub country: String,
    /// ISO-8601 instant or null for undated releases.
    pub date: Option<String>,
}

impl From<&Release> for ReleaseRow {
    fn from(rec: &Release) -> Self {
        Self {
            artist: rec.artist.clone(),
            release: rec.release.clone(),
            country: rec.country.clone(),
            date: rec.date_iso(),
        }
    }
}

/// Response for `GET /releases`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleasesResponse {
    /// Filtered count before pagination.
    pub total: usize,
    /// Rows actually returned in this page.
    pub count: usize,
    pub offset: usize,
    pub limit: usize,
    /// Effective sort field (defaulted when the request was invalid).
    pub sort_by: String,
    /// Effective sort direction.
    pub sort_dir: String,
    pub results: Vec<ReleaseRow>,
}

/// Response for `GET /release-stats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total: usize,
    pub top_artists: Vec<LabelCount>,
    pub top_countries: Vec<LabelCount>,
    pub gender_counts: GenderCounts,
}

impl From<Aggregation> for StatsResponse {
    fn from(agg: Aggregation) -> Self {
        Self {
            total: agg.total,
            top_artists: agg.top_artists,
            top_countries: agg.top_countries,
            gender_counts: agg.gender_counts,
        }
    }
}

/// Response for `GET /options`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsResponse {
    /// Distinct canonical country names, sorted.
    pub countries: Vec<String>,
    /// Earliest release date in the dataset, null when none are dated.
    pub min_date: Option<String>,
    /// Latest release date in the dataset.
    pub max_date: Option<String>,
}

/// Response for `GET /summary`.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryResponse {
    pub results: Vec<SummaryRow>,
}

/// Error body used by every failing endpoint.
pub fn error_response(error: &str) -> Value {
    json!({ "error": error })
}
