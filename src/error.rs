//! Error types for the release API.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`DatasetError`] - Loading and parsing the backing files
//! - [`ApiError`] - HTTP-level errors with their status semantics
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries. The mapping from
//! [`DatasetError`] to an HTTP status is chosen per endpoint, because
//! the summary endpoint reports a missing file as 404 while the
//! dataset endpoints report it as 500.

use thiserror::Error;

// =============================================================================
// Dataset Errors
// =============================================================================

/// Errors while reading or parsing a backing data file.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Backing file missing or unreadable.
    #[error("Data file unavailable: {path}: {message}")]
    Unavailable { path: String, message: String },

    /// Failed to decode file bytes into text.
    #[error("Failed to decode file: {0}")]
    Decode(String),

    /// Invalid tabular structure.
    #[error("Invalid table format: {0}")]
    Parse(String),

    /// File has no content.
    #[error("Table file is empty")]
    EmptyFile,

    /// Header row absent or blank.
    #[error("No headers found in table")]
    NoHeaders,

    /// Required columns absent from the header row.
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

impl DatasetError {
    /// Build an [`DatasetError::Unavailable`] from a path and IO error.
    pub fn unavailable(path: &std::path::Path, err: &std::io::Error) -> Self {
        Self::Unavailable {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

// =============================================================================
// API Errors
// =============================================================================

/// HTTP-level errors returned by the API handlers.
///
/// The response body is always `{"error": message}`; the variant picks the
/// status code. See [`crate::api`] for the `IntoResponse` implementation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Requested resource does not exist (404).
    #[error("{0}")]
    NotFound(String),

    /// Malformed or unsupported request parameter (400).
    #[error("{0}")]
    BadRequest(String),

    /// Unexpected server-side failure (500).
    #[error("{0}")]
    Internal(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for dataset operations.
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
