//! Integration tests for the release API endpoints
//!
//! Tests drive the router in-process with `tower::util::ServiceExt::oneshot`
//! against a temporary data directory, covering:
//!
//! - Listing: filtering, sorting (undated last), pagination clamps
//! - Stats: aggregates over the whole filtered set, gender buckets
//! - Options: canonical country enumeration and date range
//! - Summary: per-kind passthrough, 400/404 error mapping
//! - CORS headers and OPTIONS preflight status

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use releasedash::{build_router, AppState};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};
use tower::util::ServiceExt; // for `oneshot` method

/// Primary dataset used by most tests.
///
/// Covers every date encoding (ISO, spreadsheet serial `45000` =
/// 2023-03-15, empty), an aliased country spelling, an undated row,
/// and rows with missing optional fields.
const RELEASES_CSV: &str = "\
Artist Name,Release Name,Artist Country,Release Date,Label Name,Artist Gender
Arlo,X,France,2023-01-01,Marble,male
Basswood,Y,France,,Indie Co,female
Arlo,Z,Germany,2023-06-01,Marble,m
Cataline,W,U.A.E.,45000,Sandstone,female
Dorian,V,,2022-11-05,,
";

/// Test helper: data directory with the primary dataset and all three
/// summary files.
fn setup_data_dir() -> TempDir {
    let dir = tempdir().expect("Should create temp dir");

    fs::write(dir.path().join("NewReleases.csv"), RELEASES_CSV).unwrap();
    fs::write(
        dir.path().join("SummaryTopArtists.csv"),
        "Artist,Releases\nArlo,12\nBasswood,9\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("SummaryCountryYear.csv"),
        "Year,Country,Releases\n2023,France,4\n2022,Germany,3\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("SummaryTopCountries.csv"),
        "Country,Releases\nFrance,20\nGermany,15\n",
    )
    .unwrap();

    dir
}

/// Test helper: create the app over a data directory
fn setup_app(data_dir: &Path) -> Router {
    build_router(AppState::new(data_dir))
}

/// Test helper: create request
fn test_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Test helper: extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

/// Test helper: GET a URI and return (status, parsed body)
async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(test_request("GET", uri))
        .await
        .unwrap();
    let status = response.status();
    let body = extract_json(response.into_body()).await;
    (status, body)
}

fn result_field(body: &Value, field: &str) -> Vec<String> {
    body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r[field].as_str().unwrap_or("").to_string())
        .collect()
}

// =============================================================================
// Health Endpoint
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let dir = setup_data_dir();
    let app = setup_app(dir.path());

    let (status, body) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "releasedash");
    assert!(body["version"].is_string());
}

// =============================================================================
// Listing: /releases
// =============================================================================

#[tokio::test]
async fn test_releases_default_listing() {
    let dir = setup_data_dir();
    let app = setup_app(dir.path());

    let (status, body) = get_json(&app, "/releases").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 5);
    assert_eq!(body["count"], 5);
    assert_eq!(body["offset"], 0);
    assert_eq!(body["limit"], 100);
    // defaults echoed
    assert_eq!(body["sortBy"], "date");
    assert_eq!(body["sortDir"], "desc");

    // default sort: date desc, undated last
    assert_eq!(result_field(&body, "release"), ["Z", "W", "X", "V", "Y"]);
}

#[tokio::test]
async fn test_releases_date_asc_puts_undated_last() {
    let dir = setup_data_dir();
    let app = setup_app(dir.path());

    let (_, body) = get_json(&app, "/releases?sortBy=date&sortDir=asc").await;

    assert_eq!(result_field(&body, "release"), ["V", "X", "W", "Z", "Y"]);

    let results = body["results"].as_array().unwrap();
    // undated row serializes as explicit null
    assert!(results[4]["date"].is_null());
    // spreadsheet serial 45000
    assert_eq!(results[2]["date"], "2023-03-15T00:00:00.000Z");
    assert_eq!(results[1]["date"], "2023-01-01T00:00:00.000Z");
}

#[tokio::test]
async fn test_releases_artist_sort_is_stable() {
    let dir = setup_data_dir();
    let app = setup_app(dir.path());

    let (_, body) = get_json(&app, "/releases?sortBy=artist&sortDir=asc").await;

    // the two Arlo rows tie and keep dataset order (X before Z)
    assert_eq!(result_field(&body, "release"), ["X", "Z", "Y", "W", "V"]);
}

#[tokio::test]
async fn test_releases_unknown_sort_falls_back_to_defaults() {
    let dir = setup_data_dir();
    let app = setup_app(dir.path());

    let (status, body) = get_json(&app, "/releases?sortBy=tempo&sortDir=sideways").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sortBy"], "date");
    assert_eq!(body["sortDir"], "desc");
}

#[tokio::test]
async fn test_releases_text_query_filters_artists() {
    let dir = setup_data_dir();
    let app = setup_app(dir.path());

    let (_, body) = get_json(&app, "/releases?q=ARL").await;

    assert_eq!(body["total"], 2);
    for artist in result_field(&body, "artist") {
        assert_eq!(artist, "Arlo");
    }
}

#[tokio::test]
async fn test_releases_country_filter_repeated_and_comma_agree() {
    let dir = setup_data_dir();
    let app = setup_app(dir.path());

    let (_, repeated) = get_json(&app, "/releases?country=France&country=Germany").await;
    let (_, comma) = get_json(&app, "/releases?country=France,Germany").await;

    assert_eq!(repeated["total"], 3);
    assert_eq!(repeated["total"], comma["total"]);
    assert_eq!(repeated["results"], comma["results"]);
}

#[tokio::test]
async fn test_releases_country_filter_matches_raw_not_canonical() {
    let dir = setup_data_dir();
    let app = setup_app(dir.path());

    // the cell value is "U.A.E.": the raw spelling matches
    let (_, raw) = get_json(&app, "/releases?country=u.a.e.").await;
    assert_eq!(raw["total"], 1);
    assert_eq!(result_field(&raw, "release"), ["W"]);

    // the canonical name from /options does not
    let (_, canonical) = get_json(&app, "/releases?country=United%20Arab%20Emirates").await;
    assert_eq!(canonical["total"], 0);
}

#[tokio::test]
async fn test_releases_label_and_gender_filters() {
    let dir = setup_data_dir();
    let app = setup_app(dir.path());

    let (_, by_label) = get_json(&app, "/releases?label=marble").await;
    assert_eq!(by_label["total"], 2);

    // exact membership: "m" does not match "male" or "female"
    let (_, by_gender) = get_json(&app, "/releases?gender=m").await;
    assert_eq!(by_gender["total"], 1);
    assert_eq!(result_field(&by_gender, "release"), ["Z"]);
}

#[tokio::test]
async fn test_releases_date_range_inclusive() {
    let dir = setup_data_dir();
    let app = setup_app(dir.path());

    // both bounds land exactly on record dates
    let (_, body) = get_json(
        &app,
        "/releases?start=2023-01-01&end=2023-03-15&includeUndated=false",
    )
    .await;

    assert_eq!(body["total"], 2);
    let mut releases = result_field(&body, "release");
    releases.sort();
    assert_eq!(releases, ["W", "X"]);
}

#[tokio::test]
async fn test_releases_undated_pass_range_unless_excluded() {
    let dir = setup_data_dir();
    let app = setup_app(dir.path());

    // undated Y passes a range that excludes every dated row
    let (_, included) = get_json(&app, "/releases?start=2024-01-01").await;
    assert_eq!(included["total"], 1);
    assert_eq!(result_field(&included, "release"), ["Y"]);

    let (_, excluded) = get_json(&app, "/releases?start=2024-01-01&includeUndated=false").await;
    assert_eq!(excluded["total"], 0);
}

#[tokio::test]
async fn test_releases_exclude_undated() {
    let dir = setup_data_dir();
    let app = setup_app(dir.path());

    let (_, body) = get_json(&app, "/releases?includeUndated=false").await;

    assert_eq!(body["total"], 4);
    for row in body["results"].as_array().unwrap() {
        assert!(!row["date"].is_null());
    }
}

#[tokio::test]
async fn test_releases_pagination_count_invariant() {
    let dir = setup_data_dir();
    let app = setup_app(dir.path());

    // count == min(limit, total - offset); total invariant across pages
    let (_, page1) = get_json(&app, "/releases?limit=2").await;
    assert_eq!(page1["total"], 5);
    assert_eq!(page1["count"], 2);

    let (_, page3) = get_json(&app, "/releases?limit=2&offset=4").await;
    assert_eq!(page3["total"], 5);
    assert_eq!(page3["count"], 1);

    let (_, past_end) = get_json(&app, "/releases?limit=2&offset=10").await;
    assert_eq!(past_end["total"], 5);
    assert_eq!(past_end["count"], 0);
    assert_eq!(past_end["results"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_releases_pagination_clamps() {
    let dir = setup_data_dir();
    let app = setup_app(dir.path());

    let (_, capped) = get_json(&app, "/releases?limit=9999").await;
    assert_eq!(capped["limit"], 1000);

    let (_, floored) = get_json(&app, "/releases?limit=0&offset=-5").await;
    assert_eq!(floored["limit"], 1);
    assert_eq!(floored["offset"], 0);
    assert_eq!(floored["count"], 1);

    // unparseable values fall back to defaults
    let (_, defaulted) = get_json(&app, "/releases?limit=abc&offset=xyz").await;
    assert_eq!(defaulted["limit"], 100);
    assert_eq!(defaulted["offset"], 0);
}

#[tokio::test]
async fn test_releases_missing_dataset_is_500() {
    let dir = tempdir().unwrap();
    let app = setup_app(dir.path());

    let (status, body) = get_json(&app, "/releases").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("unavailable"));
}

// =============================================================================
// Aggregates: /release-stats
// =============================================================================

#[tokio::test]
async fn test_stats_unfiltered() {
    let dir = setup_data_dir();
    let app = setup_app(dir.path());

    let (status, body) = get_json(&app, "/release-stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 5);

    let top_artists = body["topArtists"].as_array().unwrap();
    assert_eq!(top_artists[0]["label"], "Arlo");
    assert_eq!(top_artists[0]["count"], 2);
    // ties rank in first-encounter order
    assert_eq!(top_artists[1]["label"], "Basswood");
    assert_eq!(top_artists[2]["label"], "Cataline");
    assert_eq!(top_artists[3]["label"], "Dorian");

    // countries aggregate on the raw cell value, empty as "Unknown"
    let top_countries = body["topCountries"].as_array().unwrap();
    assert_eq!(top_countries[0]["label"], "France");
    assert_eq!(top_countries[0]["count"], 2);
    let labels: Vec<&str> = top_countries
        .iter()
        .map(|c| c["label"].as_str().unwrap())
        .collect();
    assert!(labels.contains(&"U.A.E."));
    assert!(labels.contains(&"Unknown"));

    // sum(genderCounts) == total
    assert_eq!(body["genderCounts"]["male"], 2);
    assert_eq!(body["genderCounts"]["female"], 2);
    assert_eq!(body["genderCounts"]["other"], 1);
}

#[tokio::test]
async fn test_stats_honor_filters_and_ignore_pagination() {
    let dir = setup_data_dir();
    let app = setup_app(dir.path());

    // limit must not truncate the aggregation input
    let (_, body) = get_json(&app, "/release-stats?country=France,Germany&limit=1").await;

    assert_eq!(body["total"], 3);
    assert_eq!(body["topArtists"][0]["label"], "Arlo");
    assert_eq!(body["topArtists"][0]["count"], 2);
}

#[tokio::test]
async fn test_stats_exclude_undated() {
    let dir = setup_data_dir();
    let app = setup_app(dir.path());

    let (_, body) = get_json(&app, "/release-stats?includeUndated=false").await;

    // undated Basswood row drops out of every bucket
    assert_eq!(body["total"], 4);
    assert_eq!(body["genderCounts"]["female"], 1);
    let male = body["genderCounts"]["male"].as_u64().unwrap();
    let female = body["genderCounts"]["female"].as_u64().unwrap();
    let other = body["genderCounts"]["other"].as_u64().unwrap();
    assert_eq!(male + female + other, 4);
}

// =============================================================================
// Filter Options: /options
// =============================================================================

#[tokio::test]
async fn test_options_canonical_countries_and_date_range() {
    let dir = setup_data_dir();
    let app = setup_app(dir.path());

    let (status, body) = get_json(&app, "/options").await;

    assert_eq!(status, StatusCode::OK);
    // distinct, canonicalized ("U.A.E." collapses), sorted
    assert_eq!(
        body["countries"],
        serde_json::json!(["France", "Germany", "United Arab Emirates"])
    );
    assert_eq!(body["minDate"], "2022-11-05T00:00:00.000Z");
    assert_eq!(body["maxDate"], "2023-06-01T00:00:00.000Z");
}

#[tokio::test]
async fn test_options_undated_only_dataset_has_null_range() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("NewReleases.csv"),
        "Artist Name,Release Name,Artist Country,Release Date\nArlo,X,France,\n",
    )
    .unwrap();
    let app = setup_app(dir.path());

    let (_, body) = get_json(&app, "/options").await;

    assert_eq!(body["countries"], serde_json::json!(["France"]));
    assert!(body["minDate"].is_null());
    assert!(body["maxDate"].is_null());
}

// =============================================================================
// Summary Passthrough: /summary
// =============================================================================

#[tokio::test]
async fn test_summary_top_artists() {
    let dir = setup_data_dir();
    let app = setup_app(dir.path());

    let (status, body) = get_json(&app, "/summary?kind=top-artists").await;

    assert_eq!(status, StatusCode::OK);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["artist"], "Arlo");
    assert_eq!(results[0]["releases"], 12);
}

#[tokio::test]
async fn test_summary_country_year() {
    let dir = setup_data_dir();
    let app = setup_app(dir.path());

    let (status, body) = get_json(&app, "/summary?kind=country-year").await;

    assert_eq!(status, StatusCode::OK);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results[0]["year"], 2023);
    assert_eq!(results[0]["country"], "France");
    assert_eq!(results[0]["releases"], 4);
}

#[tokio::test]
async fn test_summary_top_countries() {
    let dir = setup_data_dir();
    let app = setup_app(dir.path());

    let (status, body) = get_json(&app, "/summary?kind=top-countries").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"][1]["country"], "Germany");
    assert_eq!(body["results"][1]["releases"], 15);
}

#[tokio::test]
async fn test_summary_unknown_kind_is_400() {
    let dir = setup_data_dir();
    let app = setup_app(dir.path());

    let (status, body) = get_json(&app, "/summary?kind=bogus").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Unknown summary kind"));

    // absent kind is equally unrecognized
    let (status, _) = get_json(&app, "/summary").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_summary_missing_file_is_404() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("NewReleases.csv"), RELEASES_CSV).unwrap();
    let app = setup_app(dir.path());

    let (status, body) = get_json(&app, "/summary?kind=top-artists").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Summary file not found"));
}

#[tokio::test]
async fn test_summary_does_not_need_primary_dataset() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("SummaryTopArtists.csv"),
        "Artist,Releases\nArlo,12\n",
    )
    .unwrap();
    let app = setup_app(dir.path());

    let (status, _) = get_json(&app, "/summary?kind=top-artists").await;

    assert_eq!(status, StatusCode::OK);
}

// =============================================================================
// CORS and Preflight
// =============================================================================

#[tokio::test]
async fn test_cors_headers_on_get() {
    let dir = setup_data_dir();
    let app = setup_app(dir.path());

    let request = Request::builder()
        .method("GET")
        .uri("/releases")
        .header("Origin", "http://example.com")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_preflight_returns_204() {
    let dir = setup_data_dir();
    let app = setup_app(dir.path());

    for path in ["/releases", "/release-stats", "/options", "/summary"] {
        let request = Request::builder()
            .method("OPTIONS")
            .uri(path)
            .header("Origin", "http://example.com")
            .header("Access-Control-Request-Method", "GET")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT, "path {path}");
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .unwrap(),
            "*"
        );
    }
}

#[tokio::test]
async fn test_plain_options_returns_204() {
    let dir = setup_data_dir();
    let app = setup_app(dir.path());

    let response = app
        .oneshot(test_request("OPTIONS", "/releases"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
