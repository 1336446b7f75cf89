//! # Releasedash - read-only JSON API over music release exports
//!
//! Releasedash serves a spreadsheet export of release records (plus a
//! few pre-aggregated summary files) as a small filtered/sorted/
//! aggregated HTTP API. The dataset is parsed once and cached in
//! memory, keyed by the file's modification time.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐     ┌──────────┐     ┌─────────┐     ┌─────────────┐
//! │  CSV file  │────▶│ dataset  │────▶│  query  │────▶│  JSON API   │
//! │ (any enc.) │     │ (cached) │     │ / stats │     │ (axum+CORS) │
//! └────────────┘     └──────────┘     └─────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use releasedash::api::server::run_server;
//!
//! #[tokio::main]
//! async fn main() {
//!     run_server(3000, "data").await.unwrap();
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Domain models ([`Release`])
//! - [`parser`] - Tabular parsing with encoding/delimiter auto-detection
//! - [`dataset`] - Column mapping, normalization, mtime-keyed cache
//! - [`countries`] - Country name canonicalization
//! - [`query`] - Filtering, sorting, pagination
//! - [`stats`] - Aggregation (top lists, gender buckets)
//! - [`summary`] - Pre-aggregated summary passthrough
//! - [`api`] - HTTP server and wire types

// Core modules
pub mod error;
pub mod models;

// Parsing and loading
pub mod dataset;
pub mod parser;

// Query pipeline
pub mod countries;
pub mod query;
pub mod stats;
pub mod summary;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Errors
// =============================================================================

pub use error::{ApiError, ApiResult, DatasetError, DatasetResult};

// =============================================================================
// Re-exports - Models and Loading
// =============================================================================

pub use dataset::{load_releases, DatasetCache, RELEASES_FILE};
pub use models::Release;
pub use parser::{read_table_bytes, read_table_file, Table};

// =============================================================================
// Re-exports - Query and Aggregation
// =============================================================================

pub use query::{FilterSpec, SortDir, SortField};
pub use stats::{aggregate, Aggregation};
pub use summary::{read_summary, SummaryKind};

// =============================================================================
// Re-exports - Server
// =============================================================================

pub use api::server::{build_router, run_server, AppState};
