//! Sorting and pagination of filtered records.
//!
//! The one non-obvious rule lives here: when sorting by date, undated
//! records always come last, whichever direction was requested. The
//! direction flips the comparison of dated pairs only.

use crate::models::Release;
use std::cmp::Ordering;

/// Default page size when `limit` is absent or unparseable.
pub const DEFAULT_LIMIT: usize = 100;
/// Hard ceiling on the page size.
pub const MAX_LIMIT: usize = 1000;

// =============================================================================
// Sort Spec
// =============================================================================

/// Field a listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Artist,
    Release,
    Country,
    #[default]
    Date,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    Asc,
    #[default]
    Desc,
}

impl SortField {
    /// Parse a query parameter value; unknown values are `None` so the
    /// caller can fall back to the default.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "artist" => Some(Self::Artist),
            "release" => Some(Self::Release),
            "country" => Some(Self::Country),
            "date" => Some(Self::Date),
            _ => None,
        }
    }

    /// Parameter spelling, echoed back in responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Artist => "artist",
            Self::Release => "release",
            Self::Country => "country",
            Self::Date => "date",
        }
    }
}

impl SortDir {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

// =============================================================================
// Sorting
// =============================================================================

/// Sort records in place by `field` and `dir`.
///
/// The sort is stable: records comparing equal keep their filtered
/// (dataset) order.
pub fn sort_releases(records: &mut [&Release], field: SortField, dir: SortDir) {
    records.sort_by(|a, b| compare(a, b, field, dir));
}

fn compare(a: &Release, b: &Release, field: SortField, dir: SortDir) -> Ordering {
    let ordering = match field {
        SortField::Date => match (a.date, b.date) {
            // Undated records sort last regardless of direction, so
            // these arms return before the flip below.
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Greater,
            (Some(_), None) => return Ordering::Less,
            (Some(x), Some(y)) => x.cmp(&y),
        },
        SortField::Artist => a.artist.cmp(&b.artist),
        SortField::Release => a.release.cmp(&b.release),
        SortField::Country => a.country.cmp(&b.country),
    };

    match dir {
        SortDir::Asc => ordering,
        SortDir::Desc => ordering.reverse(),
    }
}

// =============================================================================
// Pagination
// =============================================================================

/// Clamp a requested limit into `[1, MAX_LIMIT]`, defaulting when absent.
pub fn clamp_limit(requested: Option<i64>) -> usize {
    requested
        .unwrap_or(DEFAULT_LIMIT as i64)
        .clamp(1, MAX_LIMIT as i64) as usize
}

/// Clamp a requested offset to zero or above, defaulting to zero.
pub fn clamp_offset(requested: Option<i64>) -> usize {
    requested.unwrap_or(0).max(0) as usize
}

/// Slice one page out of the sorted records.
pub fn paginate<T>(items: &[T], offset: usize, limit: usize) -> &[T] {
    let start = offset.min(items.len());
    let end = (start + limit).min(items.len());
    &items[start..end]
}
