//! API integration tests for tile retrieval and error handling.
//!
//! Tests verify:
//! - Tile retrieval and payload structure
//! - Empty tiles and out-of-grid addresses
//! - Error cases (malformed paths, overflowing components, strict bounds)
//! - HTTP response codes and headers, including CORS

use axum::body::Body;
use axum::http::{Request, StatusCode};

use vtile_server::points::PointSet;
use vtile_server::tile::{command_decode, GeomType, LngLat, TileOptions, TileService};
use vtile_server::RouterConfig;

use super::test_utils::{body_bytes, decode_tile, get, router_for, router_with, sample_points, send};

// =============================================================================
// Basic Tile Retrieval
// =============================================================================

#[tokio::test]
async fn test_tile_retrieval_success() {
    let router = router_for(sample_points());

    let response = get(router, "/tiles/0/0/0").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/x-protobuf"
    );
    assert_eq!(
        response.headers().get("cache-control").unwrap(),
        "public, max-age=3600"
    );
    assert_eq!(response.headers().get("x-tile-point-count").unwrap(), "5");

    let body = body_bytes(response).await;
    assert!(!body.is_empty());
}

#[tokio::test]
async fn test_single_centered_point_tile() {
    let router = router_for(vec![LngLat::new(0.0, 0.0)]);

    let response = get(router, "/tiles/0/0/0").await;
    assert_eq!(response.status(), StatusCode::OK);

    let tile = decode_tile(&body_bytes(response).await);
    assert_eq!(tile.layers.len(), 1);

    let layer = &tile.layers[0];
    assert_eq!(layer.name, "points");
    assert_eq!(layer.version, 2);
    assert_eq!(layer.extent, Some(4096));
    assert!(layer.keys.is_empty());
    assert!(layer.values.is_empty());
    assert_eq!(layer.features.len(), 1);

    let feature = &layer.features[0];
    assert_eq!(feature.id, None);
    assert!(feature.tags.is_empty());
    assert_eq!(feature.r#type, Some(GeomType::Point as i32));
    // MoveTo(1), zigzag(2048), zigzag(2048)
    assert_eq!(feature.geometry, vec![9, 4096, 4096]);
}

#[tokio::test]
async fn test_tile_contains_only_points_inside() {
    let router = router_for(sample_points());

    // North-west quadrant: the three San Francisco trees
    let response = get(router, "/tiles/1/0/0").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("x-tile-point-count").unwrap(), "3");

    let tile = decode_tile(&body_bytes(response).await);
    let geometry = &tile.layers[0].features[0].geometry;
    assert_eq!(command_decode(geometry[0]), (1, 3));
    assert_eq!(geometry.len(), 1 + 2 * 3);
}

#[tokio::test]
async fn test_tile_path_with_extension() {
    let router = router_for(sample_points());

    let response = get(router.clone(), "/tiles/2/3/2.pbf").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("x-tile-point-count").unwrap(), "1");

    let response = get(router, "/tiles/2/3/2.mvt").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_custom_layer_options() {
    let options = TileOptions::default()
        .with_layer_name("trees")
        .with_extent(512);
    let service = TileService::with_options(PointSet::from(vec![LngLat::new(0.0, 0.0)]), options);
    let router = router_with(service, RouterConfig::new());

    let response = get(router, "/tiles/0/0/0").await;
    let tile = decode_tile(&body_bytes(response).await);

    assert_eq!(tile.layers[0].name, "trees");
    assert_eq!(tile.layers[0].extent, Some(512));
    assert_eq!(tile.layers[0].features[0].geometry, vec![9, 512, 512]);
}

#[tokio::test]
async fn test_post_is_served() {
    let router = router_for(sample_points());

    let request = Request::builder()
        .method("POST")
        .uri("/tiles/0/0/0")
        .body(Body::empty())
        .unwrap();
    let response = send(router, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/x-protobuf"
    );
}

// =============================================================================
// Empty Tiles
// =============================================================================

#[tokio::test]
async fn test_empty_tile_has_zero_length_body() {
    let router = router_for(sample_points());

    // Far north Atlantic, nothing there
    let response = get(router, "/tiles/3/3/0").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/x-protobuf"
    );
    assert_eq!(response.headers().get("x-tile-point-count").unwrap(), "0");

    let body = body_bytes(response).await;
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_empty_point_set() {
    let router = router_for(Vec::new());

    let response = get(router, "/tiles/0/0/0").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn test_out_of_grid_tile_is_empty_by_default() {
    let router = router_for(sample_points());

    let response = get(router, "/tiles/1/4/0").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_bytes(response).await.is_empty());
}

// =============================================================================
// Error Handling
// =============================================================================

#[tokio::test]
async fn test_malformed_path_is_bad_request() {
    let router = router_for(sample_points());

    let response = get(router, "/tiles/abc").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/plain"));

    let body = body_bytes(response).await;
    let message = String::from_utf8(body.to_vec()).unwrap();
    assert!(message.contains("abc"));
}

#[tokio::test]
async fn test_incomplete_path_is_bad_request() {
    let router = router_for(sample_points());

    let response = get(router, "/tiles/1/2").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_empty_tile_path_is_bad_request() {
    let router = router_for(sample_points());

    for uri in ["/tiles/", "/tiles"] {
        let response = get(router.clone(), uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert!(response
            .headers()
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("text/plain"));
    }

    let request = Request::builder()
        .method("POST")
        .uri("/tiles/")
        .body(Body::empty())
        .unwrap();
    let response = send(router, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_overflowing_component_is_bad_request() {
    let router = router_for(sample_points());

    let response = get(router, "/tiles/99999999999/1/1").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(!body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn test_strict_bounds_rejects_out_of_grid_tile() {
    let service =
        TileService::new(PointSet::from(sample_points())).with_strict_bounds(true);
    let router = router_with(service, RouterConfig::new());

    let response = get(router.clone(), "/tiles/1/4/0").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // In-grid tiles are unaffected
    let response = get(router, "/tiles/1/0/0").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let router = router_for(sample_points());

    let response = get(router, "/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// CORS
// =============================================================================

#[tokio::test]
async fn test_cors_headers_on_tile_response() {
    let router = router_for(sample_points());

    let request = Request::builder()
        .uri("/tiles/0/0/0")
        .header("origin", "https://maps.example.com")
        .body(Body::empty())
        .unwrap();
    let response = send(router, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "*"
    );
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-methods")
            .unwrap(),
        "GET, POST, OPTIONS"
    );
}

#[tokio::test]
async fn test_cors_headers_on_error_response() {
    let router = router_for(sample_points());

    let request = Request::builder()
        .uri("/tiles/abc")
        .header("origin", "https://maps.example.com")
        .body(Body::empty())
        .unwrap();
    let response = send(router, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_cors_preflight() {
    let router = router_for(sample_points());

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/tiles/0/0/0")
        .header("origin", "https://maps.example.com")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();
    let response = send(router, request).await;

    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "*"
    );

    let methods = response
        .headers()
        .get("access-control-allow-methods")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(methods.contains("GET"));
    assert!(methods.contains("POST"));
    assert!(methods.contains("OPTIONS"));
}

#[tokio::test]
async fn test_cors_restricted_origins() {
    let config = RouterConfig::new().with_cors_origins(vec!["https://allowed.com".to_string()]);
    let router = router_with(TileService::new(PointSet::from(sample_points())), config);

    let request = Request::builder()
        .uri("/tiles/0/0/0")
        .header("origin", "https://allowed.com")
        .body(Body::empty())
        .unwrap();
    let response = send(router.clone(), request).await;
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "https://allowed.com"
    );

    let request = Request::builder()
        .uri("/tiles/0/0/0")
        .header("origin", "https://other.com")
        .body(Body::empty())
        .unwrap();
    let response = send(router, request).await;
    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}

// =============================================================================
// Health Check
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let router = router_for(sample_points());

    let response = get(router, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_bytes(response).await;
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["status"], "healthy");
    assert_eq!(json["points"], 5);
    assert!(json["version"].is_string());
}
