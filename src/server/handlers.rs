//! HTTP request handlers for the vector tile API.
//!
//! # Endpoints
//!
//! - `GET|POST /tiles/{z}/{x}/{y}` - Serve a point tile
//! - `GET|POST /tiles/` - Always `400`, no tile address given
//! - `GET /health` - Health check endpoint

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::error::{TileError, TileIdError};
use crate::tile::{TileId, TileService};

/// Content type of MVT payloads.
pub const MVT_CONTENT_TYPE: &str = "application/x-protobuf";

/// Response header reporting how many points a tile holds.
pub const POINT_COUNT_HEADER: &str = "x-tile-point-count";

// =============================================================================
// Application State
// =============================================================================

/// Shared application state containing the tile service.
///
/// This is passed to all handlers via Axum's State extractor.
#[derive(Clone)]
pub struct AppState {
    /// The tile service, shared read-only across requests
    pub tile_service: Arc<TileService>,

    /// Cache-Control max-age in seconds
    pub cache_max_age: u32,
}

impl AppState {
    /// Create a new application state with the given tile service.
    pub fn new(tile_service: TileService) -> Self {
        Self::with_cache_max_age(tile_service, 3600)
    }

    /// Create a new application state with custom cache max-age.
    pub fn with_cache_max_age(tile_service: TileService, cache_max_age: u32) -> Self {
        Self {
            tile_service: Arc::new(tile_service),
            cache_max_age,
        }
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,

    /// Number of points being served
    pub points: usize,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Convert TileError to a plain-text HTTP response.
///
/// Client errors are logged at WARN level, server errors at ERROR level.
impl IntoResponse for TileError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            TileError::InvalidTile(err) => {
                (StatusCode::BAD_REQUEST, format!("Invalid tile url: {}", err))
            }
            TileError::Encode(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to encode tile: {}", err),
            ),
        };

        if status.is_server_error() {
            error!(status = status.as_u16(), "Server error: {}", message);
        } else {
            warn!(status = status.as_u16(), "Client error: {}", message);
        }

        (status, message).into_response()
    }
}

/// Wrapper for handler errors to implement IntoResponse.
pub struct HandlerError(pub TileError);

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        self.0.into_response()
    }
}

impl From<TileError> for HandlerError {
    fn from(err: TileError) -> Self {
        HandlerError(err)
    }
}

impl From<TileIdError> for HandlerError {
    fn from(err: TileIdError) -> Self {
        HandlerError(TileError::InvalidTile(err))
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle tile requests.
///
/// # Endpoint
///
/// `GET /tiles/{z}/{x}/{y}`
///
/// The first `{z}/{x}/{y}` sequence in the path is used, so suffixes such as
/// `.pbf` or `.mvt` are accepted.
///
/// # Response
///
/// - `200 OK`: MVT payload, zero-length when no point falls inside the tile
/// - `400 Bad Request`: The path holds no tile address, or a component overflows
/// - `500 Internal Server Error`: The tile could not be serialized
///
/// # Headers
///
/// - `Content-Type: application/x-protobuf`
/// - `Cache-Control: public, max-age={cache_max_age}`
/// - `X-Tile-Point-Count: {n}`
pub async fn tile_handler(
    State(state): State<AppState>,
    Path(tile_path): Path<String>,
) -> Result<Response, HandlerError> {
    debug!(path = %tile_path, "Tile request");

    let tile = TileId::from_path(&tile_path)?;
    let response = state.tile_service.get_tile(tile)?;

    let http_response = (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, MVT_CONTENT_TYPE.to_string()),
            (
                header::CACHE_CONTROL,
                format!("public, max-age={}", state.cache_max_age),
            ),
        ],
        [(POINT_COUNT_HEADER, response.point_count.to_string())],
        response.data,
    )
        .into_response();

    Ok(http_response)
}

/// Handle tile requests that carry no tile address at all.
///
/// # Endpoint
///
/// `GET /tiles` and `GET /tiles/`
///
/// The wildcard tile route never matches an empty tail, so these paths are
/// answered here with the same `400 Bad Request` as any other malformed path.
pub async fn empty_tile_handler() -> HandlerError {
    HandlerError::from(TileIdError::NoMatch {
        path: String::new(),
    })
}

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// ```json
/// {"status": "healthy", "version": "0.1.0", "points": 195312}
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        points: state.tile_service.point_count(),
    })
}

// =============================================================================
// Tests
// =============================================================================
