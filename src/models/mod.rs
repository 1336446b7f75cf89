//! Domain models for the release API.
//!
//! The core type is [`Release`], one normalized row of the dataset.
//! A release always has a non-empty artist and release name; everything
//! else may be empty or absent. Undated releases are first-class: their
//! `date` is simply `None`, and the query layer decides what that means.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Release
// =============================================================================

/// One normalized release record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    /// Artist name (never empty).
    pub artist: String,
    /// Release title (never empty).
    pub release: String,
    /// Artist country as written in the source, possibly empty.
    pub country: String,
    /// Release date, absent when missing or unparseable in the source.
    pub date: Option<DateTime<Utc>>,
    /// Label name, absent when the source has no label column or cell.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Artist gender as written in the source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

impl Release {
    /// Create a release with the required fields; label and gender unset.
    pub fn new(
        artist: impl Into<String>,
        release: impl Into<String>,
        country: impl Into<String>,
        date: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            artist: artist.into(),
            release: release.into(),
            country: country.into(),
            date,
            label: None,
            gender: None,
        }
    }

    /// Date formatted for JSON output, `None` for undated releases.
    pub fn date_iso(&self) -> Option<String> {
        self.date.map(|d| iso_millis(&d))
    }
}

/// Format an instant as ISO-8601 with millisecond precision and `Z` suffix.
///
/// This is the one date format the API emits, e.g. `2023-01-01T00:00:00.000Z`.
pub fn iso_millis(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

// =============================================================================
// Tests
// =============================================================================
