//! Filtering, sorting, and pagination over the release dataset.
//!
//! Every endpoint that reads records goes through this one pipeline:
//! [`filter::FilterSpec::apply`], then (for listings)
//! [`sort::sort_releases`] and [`sort::paginate`].

pub mod filter;
pub mod sort;

pub use filter::FilterSpec;
pub use sort::{
    clamp_limit, clamp_offset, paginate, sort_releases, SortDir, SortField, DEFAULT_LIMIT,
    MAX_LIMIT,
};
