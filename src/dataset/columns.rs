//! Column resolution for the release spreadsheet schema.
//!
//! The export carries fixed header names. Artist and release are
//! required; the rest degrade to absent fields when the column is
//! missing, so older exports without label or gender still load.

use crate::error::{DatasetError, DatasetResult};

/// Header of the artist name column.
pub const ARTIST: &str = "Artist Name";
/// Header of the release title column.
pub const RELEASE: &str = "Release Name";
/// Header of the artist country column.
pub const COUNTRY: &str = "Artist Country";
/// Header of the release date column.
pub const DATE: &str = "Release Date";
/// Header of the label column (optional in older exports).
pub const LABEL: &str = "Label Name";
/// Header of the gender column (optional in older exports).
pub const GENDER: &str = "Artist Gender";

/// Resolved cell indices for one file's header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub artist: usize,
    pub release: usize,
    pub country: Option<usize>,
    pub date: Option<usize>,
    pub label: Option<usize>,
    pub gender: Option<usize>,
}

impl ColumnMap {
    /// Resolve the schema against a parsed header row.
    ///
    /// Fails with the full list of missing required columns rather than
    /// the first one, so a bad export is diagnosed in one pass.
    pub fn resolve(headers: &[String]) -> DatasetResult<Self> {
        let artist = find(headers, ARTIST);
        let release = find(headers, RELEASE);

        let missing: Vec<String> = [(ARTIST, artist), (RELEASE, release)]
            .iter()
            .filter(|(_, idx)| idx.is_none())
            .map(|(name, _)| name.to_string())
            .collect();

        match (artist, release) {
            (Some(artist), Some(release)) => Ok(Self {
                artist,
                release,
                country: find(headers, COUNTRY),
                date: find(headers, DATE),
                label: find(headers, LABEL),
                gender: find(headers, GENDER),
            }),
            _ => Err(DatasetError::MissingColumns(missing)),
        }
    }
}

fn find(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_full_schema() {
        let cols = ColumnMap::resolve(&headers(&[
            "Artist Name",
            "Release Name",
            "Artist Country",
            "Release Date",
            "Label Name",
            "Artist Gender",
        ]))
        .unwrap();

        assert_eq!(cols.artist, 0);
        assert_eq!(cols.release, 1);
        assert_eq!(cols.country, Some(2));
        assert_eq!(cols.date, Some(3));
        assert_eq!(cols.label, Some(4));
        assert_eq!(cols.gender, Some(5));
    }

    #[test]
    fn test_resolve_reordered_headers() {
        let cols =
            ColumnMap::resolve(&headers(&["Release Date", "Release Name", "Artist Name"])).unwrap();

        assert_eq!(cols.artist, 2);
        assert_eq!(cols.release, 1);
        assert_eq!(cols.date, Some(0));
        assert_eq!(cols.country, None);
    }

    #[test]
    fn test_optional_columns_may_be_absent() {
        let cols = ColumnMap::resolve(&headers(&["Artist Name", "Release Name"])).unwrap();

        assert_eq!(cols.country, None);
        assert_eq!(cols.date, None);
        assert_eq!(cols.label, None);
        assert_eq!(cols.gender, None);
    }

    #[test]
    fn test_missing_required_lists_all() {
        let err = ColumnMap::resolve(&headers(&["Artist Country"])).unwrap_err();

        match err {
            DatasetError::MissingColumns(missing) => {
                assert_eq!(missing, vec!["Artist Name", "Release Name"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
