//! Web-Mercator projection between geographic and tile-local coordinates.
//!
//! Tile-local coordinates are fractions of a single tile: `(0, 0)` is the
//! tile's north-west corner and `(1, 1)` its south-east corner. A point lies
//! inside a tile when both fractions fall in `[0, 1)`.
//!
//! Neither direction special-cases the poles or wraps longitudes. Latitudes at
//! or beyond ±90° produce non-finite values, which the bounds check treats as
//! outside every tile.

use std::f64::consts::PI;

use super::id::TileId;

// =============================================================================
// Coordinates
// =============================================================================

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LngLat {
    /// Longitude in degrees
    pub lng: f64,

    /// Latitude in degrees
    pub lat: f64,
}

impl LngLat {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

/// A position relative to a tile's north-west corner, in tile units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilePoint {
    pub x: f64,
    pub y: f64,
}

impl TilePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether the point falls inside the tile, i.e. both axes are in `[0, 1)`.
    #[inline]
    pub fn in_tile(&self) -> bool {
        (0.0..1.0).contains(&self.x) && (0.0..1.0).contains(&self.y)
    }
}

// =============================================================================
// Projection
// =============================================================================

/// Project a geographic position into the local space of `tile`.
pub fn lng_lat_to_tile(point: LngLat, tile: TileId) -> TilePoint {
    let total_tiles = 2f64.powf(f64::from(tile.z));

    let lambda = (point.lng + 180.0) / 180.0 * PI;
    let phi = point.lat / 180.0 * PI;

    let tile_x = lambda / (2.0 * PI) * total_tiles;
    let tile_y = ((PI / 4.0 - phi / 2.0).tan().ln() / PI / 2.0 + 0.5) * total_tiles;

    TilePoint::new(tile_x - f64::from(tile.x), tile_y - f64::from(tile.y))
}

/// Convert a fractional global tile position at zoom `tile_z` to degrees.
///
/// The longitude is the usual inverse Mercator longitude. The latitude is
/// reported as `180° − φ`, where `φ` is the Mercator latitude of `tile_y`;
/// callers that need real geographic extents should use [`TileId::bounds`].
pub fn tile_to_lng_lat(tile_x: f64, tile_y: f64, tile_z: f64) -> LngLat {
    let total_tiles = 2f64.powf(tile_z);
    let x = tile_x / total_tiles;
    let y = tile_y / total_tiles;

    let lambda = x * PI * 2.0 - PI;
    let phi = 2.0 * ((2.0 * y - 1.0) * PI).exp().atan() - PI / 2.0;

    LngLat::new(lambda * 180.0 / PI, (PI - phi) * 180.0 / PI)
}

/// Project `points` into `tile` and keep those that land inside it.
///
/// Input order is preserved.
pub fn points_in_tile(points: &[LngLat], tile: TileId) -> Vec<TilePoint> {
    points
        .iter()
        .map(|&point| lng_lat_to_tile(point, tile))
        .filter(TilePoint::in_tile)
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
