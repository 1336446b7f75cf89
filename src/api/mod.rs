//! HTTP API layer: router, handlers, parameter normalization, and
//! response types.

pub mod params;
pub mod server;
pub mod types;

use crate::error::ApiError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

impl ApiError {
    /// Status code for the variant.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(types::error_response(&self.to_string()))).into_response()
    }
}
