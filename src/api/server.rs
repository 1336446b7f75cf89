//! HTTP server for the release API.
//!
//! All endpoints are read-only and CORS-open; `OPTIONS` on any data
//! route answers 204 for preflight.
//!
//! # API Endpoints
//!
//! | Method | Path              | Description                            |
//! |--------|-------------------|----------------------------------------|
//! | GET    | `/health`         | Health check                           |
//! | GET    | `/releases`       | Filtered, sorted, paginated listing    |
//! | GET    | `/release-stats`  | Aggregates over the full filtered set  |
//! | GET    | `/options`        | Filter options (countries, date range) |
//! | GET    | `/summary`        | Pre-aggregated summary passthrough     |

use axum::{
    extract::{Query, Request, State},
    http::{header, Method, StatusCode},
    middleware::{self, Next},
    response::{Json, Response},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::collections::BTreeSet;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use super::params::{self, QueryPairs};
use super::types::{
    OptionsResponse, ReleaseRow, ReleasesResponse, StatsResponse, SummaryResponse,
};
use crate::countries::canonicalize;
use crate::dataset::{DatasetCache, RELEASES_FILE};
use crate::error::{ApiError, ApiResult, DatasetError};
use crate::models::iso_millis;
use crate::query::{paginate, sort_releases};
use crate::stats::aggregate;
use crate::summary::{read_summary, SummaryKind};

/// Shared state: the dataset cache plus the directory the summary
/// files live in.
#[derive(Clone)]
pub struct AppState {
    cache: Arc<DatasetCache>,
    data_dir: PathBuf,
}

impl AppState {
    /// State rooted at a data directory containing `NewReleases.csv`
    /// and the summary files.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let cache = Arc::new(DatasetCache::new(data_dir.join(RELEASES_FILE)));
        Self { cache, data_dir }
    }
}

/// Build the application router. Separate from [`run_server`] so tests
/// can drive it in-process.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/releases", get(list_releases).options(preflight))
        .route("/release-stats", get(release_stats).options(preflight))
        .route("/options", get(filter_options).options(preflight))
        .route("/summary", get(summary).options(preflight))
        .layer(cors)
        .layer(middleware::from_fn(preflight_no_content))
        .with_state(state)
}

/// The CORS layer answers preflight OPTIONS itself with an empty 200;
/// the documented contract for every endpoint is 204.
async fn preflight_no_content(request: Request, next: Next) -> Response {
    let preflight = request.method() == Method::OPTIONS;
    let mut response = next.run(request).await;

    if preflight && response.status() == StatusCode::OK {
        *response.status_mut() = StatusCode::NO_CONTENT;
    }
    response
}

/// Bind and serve until shutdown.
pub async fn run_server(
    port: u16,
    data_dir: impl Into<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(AppState::new(data_dir));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("releasedash listening on http://localhost:{port}");

    axum::serve(listener, app).await?;

    Ok(())
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "releasedash",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Plain OPTIONS on a data route (CORS preflights with request headers
/// are answered by the layer).
async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// `GET /releases` - filtered, sorted, paginated listing.
async fn list_releases(
    State(state): State<AppState>,
    Query(raw): Query<Vec<(String, String)>>,
) -> ApiResult<Json<ReleasesResponse>> {
    let records = state.cache.get().map_err(internal)?;
    let pairs = QueryPairs::new(raw);

    let spec = params::filter_spec(&pairs);
    let (sort_by, sort_dir) = params::sort_spec(&pairs);
    let (offset, limit) = params::page_spec(&pairs);

    let mut filtered = spec.apply(&records);
    sort_releases(&mut filtered, sort_by, sort_dir);

    let total = filtered.len();
    let page = paginate(&filtered, offset, limit);

    Ok(Json(ReleasesResponse {
        total,
        count: page.len(),
        offset,
        limit,
        sort_by: sort_by.as_str().to_string(),
        sort_dir: sort_dir.as_str().to_string(),
        results: page.iter().map(|rec| ReleaseRow::from(*rec)).collect(),
    }))
}

/// `GET /release-stats` - aggregates over the whole filtered set,
/// ignoring pagination and sort parameters.
async fn release_stats(
    State(state): State<AppState>,
    Query(raw): Query<Vec<(String, String)>>,
) -> ApiResult<Json<StatsResponse>> {
    let records = state.cache.get().map_err(internal)?;
    let pairs = QueryPairs::new(raw);

    let filtered = params::filter_spec(&pairs).apply(&records);
    let aggregation = aggregate(&filtered);

    Ok(Json(StatsResponse::from(aggregation)))
}

/// `GET /options` - distinct canonical countries and the dataset's
/// date range, for populating filter controls.
async fn filter_options(State(state): State<AppState>) -> ApiResult<Json<OptionsResponse>> {
    let records = state.cache.get().map_err(internal)?;

    let mut countries = BTreeSet::new();
    for rec in records.iter() {
        let canonical = canonicalize(&rec.country);
        if !canonical.is_empty() {
            countries.insert(canonical);
        }
    }

    let min_date = records.iter().filter_map(|r| r.date).min();
    let max_date = records.iter().filter_map(|r| r.date).max();

    Ok(Json(OptionsResponse {
        countries: countries.into_iter().collect(),
        min_date: min_date.map(|d| iso_millis(&d)),
        max_date: max_date.map(|d| iso_millis(&d)),
    }))
}

/// `GET /summary?kind=...` - pre-aggregated file passthrough.
async fn summary(
    State(state): State<AppState>,
    Query(raw): Query<Vec<(String, String)>>,
) -> ApiResult<Json<SummaryResponse>> {
    let pairs = QueryPairs::new(raw);
    let requested = pairs.first("kind").unwrap_or("");

    let kind = SummaryKind::parse(requested)
        .ok_or_else(|| ApiError::BadRequest(format!("Unknown summary kind: {requested}")))?;

    let results = read_summary(&state.data_dir, kind).map_err(|err| match err {
        DatasetError::Unavailable { .. } => {
            ApiError::NotFound(format!("Summary file not found: {}", kind.file_name()))
        }
        other => internal(other),
    })?;

    Ok(Json(SummaryResponse { results }))
}

/// Map a dataset failure to a 500, logging the detail server-side.
fn internal(err: DatasetError) -> ApiError {
    tracing::error!(error = %err, "dataset access failed");
    ApiError::Internal(err.to_string())
}
