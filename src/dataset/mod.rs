//! Dataset loading: file bytes to normalized [`Release`] records.
//!
//! ```text
//! ┌────────────┐     ┌──────────┐     ┌───────────┐     ┌──────────────┐
//! │  CSV file  │────▶│  parser  │────▶│ normalize │────▶│ Vec<Release> │
//! │ (any enc.) │     │ (Table)  │     │ (records) │     │   (cached)   │
//! └────────────┘     └──────────┘     └───────────┘     └──────────────┘
//! ```
//!
//! [`load_releases`] is the whole pipeline for one file;
//! [`cache::DatasetCache`] wraps it with mtime-keyed reuse.

pub mod cache;
pub mod columns;
pub mod normalize;

pub use cache::DatasetCache;
pub use columns::ColumnMap;
pub use normalize::{normalize_row, parse_date};

use crate::error::DatasetResult;
use crate::models::Release;
use crate::parser::read_table_bytes;
use std::path::Path;

/// File name of the primary dataset inside the data directory.
pub const RELEASES_FILE: &str = "NewReleases.csv";

/// Read, parse, and normalize the release dataset at `path`.
///
/// Rows without an artist or release title are dropped; everything else
/// (including undated rows) is kept in file order.
pub fn load_releases(path: &Path) -> DatasetResult<Vec<Release>> {
    let bytes =
        std::fs::read(path).map_err(|e| crate::error::DatasetError::unavailable(path, &e))?;

    let table = read_table_bytes(&bytes)?;
    let cols = ColumnMap::resolve(&table.headers)?;

    Ok(table
        .rows
        .iter()
        .filter_map(|row| normalize_row(row, &cols))
        .collect())
}
