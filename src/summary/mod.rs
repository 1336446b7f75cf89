//! Pre-aggregated summary files.
//!
//! Three fixed views live as separate spreadsheet exports next to the
//! main dataset and are served as passthrough, reshaped per kind:
//!
//! | kind            | file                      | columns                 |
//! |-----------------|---------------------------|-------------------------|
//! | `top-artists`   | `SummaryTopArtists.csv`   | Artist, Releases        |
//! | `country-year`  | `SummaryCountryYear.csv`  | Year, Country, Releases |
//! | `top-countries` | `SummaryTopCountries.csv` | Country, Releases       |
//!
//! Summary files are small and change rarely, so they are read per
//! request rather than cached.

use crate::error::{DatasetError, DatasetResult};
use crate::parser::{read_table_bytes, Table};
use serde::Serialize;
use std::path::Path;

// =============================================================================
// Summary Kinds
// =============================================================================

/// One of the fixed pre-aggregated views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryKind {
    TopArtists,
    CountryYear,
    TopCountries,
}

impl SummaryKind {
    /// Parse the `kind` query parameter.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "top-artists" => Some(Self::TopArtists),
            "country-year" => Some(Self::CountryYear),
            "top-countries" => Some(Self::TopCountries),
            _ => None,
        }
    }

    /// Parameter spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TopArtists => "top-artists",
            Self::CountryYear => "country-year",
            Self::TopCountries => "top-countries",
        }
    }

    /// Backing file name inside the data directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::TopArtists => "SummaryTopArtists.csv",
            Self::CountryYear => "SummaryCountryYear.csv",
            Self::TopCountries => "SummaryTopCountries.csv",
        }
    }
}

// =============================================================================
// Summary Rows
// =============================================================================

/// One shaped summary row. Untagged: each kind serializes as its plain
/// object shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SummaryRow {
    TopArtist {
        artist: String,
        releases: i64,
    },
    CountryYear {
        year: i64,
        country: String,
        releases: i64,
    },
    TopCountry {
        country: String,
        releases: i64,
    },
}

// =============================================================================
// Reading
// =============================================================================

/// Read and shape the summary file for `kind` under `data_dir`.
///
/// A missing file is [`DatasetError::Unavailable`]; the HTTP layer maps
/// that to 404 for this endpoint.
pub fn read_summary(data_dir: &Path, kind: SummaryKind) -> DatasetResult<Vec<SummaryRow>> {
    let path = data_dir.join(kind.file_name());
    let bytes = std::fs::read(&path).map_err(|e| DatasetError::unavailable(&path, &e))?;
    let table = read_table_bytes(&bytes)?;

    Ok(shape_rows(&table, kind))
}

/// Shape raw table rows per kind, dropping rows with empty key fields.
fn shape_rows(table: &Table, kind: SummaryKind) -> Vec<SummaryRow> {
    let col = |name: &str| table.headers.iter().position(|h| h == name);

    match kind {
        SummaryKind::TopArtists => {
            let artist = col("Artist");
            let releases = col("Releases");
            table
                .rows
                .iter()
                .filter_map(|row| {
                    let artist = text(row, artist);
                    if artist.is_empty() {
                        return None;
                    }
                    Some(SummaryRow::TopArtist {
                        artist,
                        releases: count(row, releases),
                    })
                })
                .collect()
        }
        SummaryKind::CountryYear => {
            let year = col("Year");
            let country = col("Country");
            let releases = col("Releases");
            table
                .rows
                .iter()
                .filter_map(|row| {
                    let country = text(row, country);
                    let year = count(row, year);
                    if country.is_empty() || year == 0 {
                        return None;
                    }
                    Some(SummaryRow::CountryYear {
                        year,
                        country,
                        releases: count(row, releases),
                    })
                })
                .collect()
        }
        SummaryKind::TopCountries => {
            let country = col("Country");
            let releases = col("Releases");
            table
                .rows
                .iter()
                .filter_map(|row| {
                    let country = text(row, country);
                    if country.is_empty() {
                        return None;
                    }
                    Some(SummaryRow::TopCountry {
                        country,
                        releases: count(row, releases),
                    })
                })
                .collect()
        }
    }
}

fn text(row: &[String], idx: Option<usize>) -> String {
    idx.and_then(|i| row.get(i))
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Numeric cell coercion: integer if it parses, truncated float as a
/// fallback, zero otherwise.
fn count(row: &[String], idx: Option<usize>) -> i64 {
    let raw = idx.and_then(|i| row.get(i)).map(|s| s.trim()).unwrap_or("");

    if let Ok(n) = raw.parse::<i64>() {
        return n;
    }
    raw.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(|n| n as i64)
        .unwrap_or(0)
}
