//! Point loading integration tests.
//!
//! Tests verify:
//! - CSV files load in record order with unusable rows skipped
//! - Custom coordinate columns
//! - Missing files and missing columns are reported
//! - A loaded file can be served end to end

use approx::assert_relative_eq;
use axum::http::StatusCode;

use vtile_server::error::PointsError;
use vtile_server::points::{load_points, CsvColumns};
use vtile_server::tile::{decode_geometry, TileService};
use vtile_server::RouterConfig;

use super::test_utils::{body_bytes, decode_tile, get, router_with, write_csv, TREES_CSV};

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_load_points_from_file() {
    let file = write_csv(TREES_CSV);

    let points = load_points(file.path(), &CsvColumns::default()).unwrap();

    // Row 3 has empty coordinates
    assert_eq!(points.len(), 3);
    assert_relative_eq!(points[0].lng, -122.4198);
    assert_relative_eq!(points[0].lat, 37.7619);
    assert_relative_eq!(points[2].lng, -122.4370);
    assert_relative_eq!(points[2].lat, 37.8005);
}

#[test]
fn test_load_points_custom_columns() {
    let file = write_csv("name,y,x\na,10.5,20.25\nb,-5,-7.5\n");

    let points = load_points(file.path(), &CsvColumns::new("y", "x")).unwrap();

    assert_eq!(points.len(), 2);
    assert_relative_eq!(points[0].lng, 20.25);
    assert_relative_eq!(points[0].lat, 10.5);
    assert_relative_eq!(points[1].lng, -7.5);
    assert_relative_eq!(points[1].lat, -5.0);
}

#[test]
fn test_load_points_extent() {
    let file = write_csv(TREES_CSV);
    let points = load_points(file.path(), &CsvColumns::default()).unwrap();

    let (sw, ne) = points.extent().unwrap();
    assert_relative_eq!(sw.lng, -122.4370);
    assert_relative_eq!(sw.lat, 37.7619);
    assert_relative_eq!(ne.lng, -122.4104);
    assert_relative_eq!(ne.lat, 37.8005);
}

#[test]
fn test_load_points_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.csv");

    let err = load_points(&path, &CsvColumns::default()).unwrap_err();
    assert!(matches!(err, PointsError::Io { .. }));
}

#[test]
fn test_load_points_missing_column() {
    let file = write_csv("lat,lon\n1,2\n");

    let err = load_points(file.path(), &CsvColumns::default()).unwrap_err();
    match err {
        PointsError::MissingColumn(name) => assert_eq!(name, "Latitude"),
        other => panic!("unexpected error: {other}"),
    }
}

// =============================================================================
// End to End
// =============================================================================

#[tokio::test]
async fn test_serve_loaded_points() {
    let file = write_csv(TREES_CSV);
    let points = load_points(file.path(), &CsvColumns::default()).unwrap();
    let router = router_with(TileService::new(points), RouterConfig::new());

    // San Francisco at zoom 11
    let response = get(router.clone(), "/tiles/11/327/791").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("x-tile-point-count").unwrap(), "3");

    let tile = decode_tile(&body_bytes(response).await);
    let positions = decode_geometry(&tile.layers[0].features[0].geometry).unwrap();
    assert_eq!(positions.len(), 3);
    for (x, y) in positions {
        assert!((0..4096).contains(&x));
        assert!((0..4096).contains(&y));
    }

    let response = get(router, "/health").await;
    let body = body_bytes(response).await;
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["points"], 3);
}
