//! Tile Service for orchestrating tile generation.
//!
//! The TileService is the main entry point for tile requests. It owns the
//! shared point snapshot and the layer settings, and for every request:
//! - Optionally validates the tile address against its zoom level
//! - Projects and filters the points
//! - Encodes the geometry and serializes the tile
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         TileService                             │
//! │  ┌─────────────────────────────────────────────────────────┐    │
//! │  │                    get_tile()                           │    │
//! │  │  1. Validate address   3. Encode geometry               │    │
//! │  │  2. Project & filter   4. Serialize tile                │    │
//! │  └─────────────────────────────────────────────────────────┘    │
//! │              │                              │                   │
//! │              ▼                              ▼                   │
//! │       ┌────────────┐               ┌────────────────┐           │
//! │       │  PointSet  │               │  TileAssembler │           │
//! │       └────────────┘               └────────────────┘           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Requests share nothing mutable, so one service is used concurrently by
//! every handler without locking.

use bytes::Bytes;
use tracing::debug;

use crate::error::{TileError, TileIdError};
use crate::points::PointSet;

use super::assembler::{encode_tile, TileAssembler, TileOptions};
use super::id::TileId;
use super::mvt::Tile;

// =============================================================================
// Tile Response
// =============================================================================

/// Response from the tile service.
#[derive(Debug, Clone, PartialEq)]
pub struct TileResponse {
    /// The serialized tile, empty when no point falls inside it
    pub data: Bytes,

    /// Number of points encoded in the tile
    pub point_count: usize,
}

impl TileResponse {
    fn empty() -> Self {
        Self {
            data: Bytes::new(),
            point_count: 0,
        }
    }

    /// Whether the tile carries no layer.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

// =============================================================================
// Tile Service
// =============================================================================

/// Service for generating point tiles.
///
/// # Example
///
/// ```
/// use vtile_server::points::PointSet;
/// use vtile_server::tile::{LngLat, TileId, TileService};
///
/// let points = PointSet::from(vec![LngLat::new(0.0, 0.0)]);
/// let service = TileService::new(points);
///
/// let response = service.get_tile(TileId::new(0, 0, 0)).unwrap();
/// assert_eq!(response.point_count, 1);
/// ```
#[derive(Debug, Clone)]
pub struct TileService {
    /// The read-only point snapshot
    points: PointSet,

    /// Layer settings and geometry encoding
    assembler: TileAssembler,

    /// Reject tiles outside the `2^z × 2^z` grid instead of returning them empty
    strict_bounds: bool,
}

impl TileService {
    /// Create a new tile service with default layer settings.
    pub fn new(points: PointSet) -> Self {
        Self::with_options(points, TileOptions::default())
    }

    /// Create a new tile service with custom layer settings.
    pub fn with_options(points: PointSet, options: TileOptions) -> Self {
        Self {
            points,
            assembler: TileAssembler::new(options),
            strict_bounds: false,
        }
    }

    /// Enable or disable rejection of out-of-range tile addresses.
    pub fn with_strict_bounds(mut self, strict: bool) -> Self {
        self.strict_bounds = strict;
        self
    }

    /// Build the tile at `tile`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - strict bounds are enabled and the tile does not exist at its zoom
    /// - the tile cannot be serialized
    pub fn get_tile(&self, tile: TileId) -> Result<TileResponse, TileError> {
        if self.strict_bounds && !tile.is_valid() {
            return Err(TileIdError::OutOfRange {
                x: tile.x,
                y: tile.y,
                z: tile.z,
            }
            .into());
        }

        let Some((layer, point_count)) = self.assembler.counted_layer(tile, &self.points) else {
            debug!(%tile, "Tile has no points");
            return Ok(TileResponse::empty());
        };

        let data = encode_tile(&Tile::from(layer))?;
        debug!(%tile, point_count, bytes = data.len(), "Encoded tile");

        Ok(TileResponse { data, point_count })
    }

    /// Number of points served.
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn points(&self) -> &PointSet {
        &self.points
    }

    pub fn options(&self) -> &TileOptions {
        self.assembler.options()
    }

    pub fn strict_bounds(&self) -> bool {
        self.strict_bounds
    }
}

// =============================================================================
// Tests
// =============================================================================
