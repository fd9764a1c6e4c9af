//! Tile assembly.
//!
//! Combines projection, filtering and geometry encoding into a single-layer
//! vector tile. All points that fall inside the requested tile become one
//! multi-point feature. A tile without any such point has no layer at all and
//! serializes to an empty payload.

use bytes::{Bytes, BytesMut};
use prost::Message;

use crate::error::TileError;

use super::geometry::encode_points;
use super::id::TileId;
use super::mvt::{Feature, GeomType, Layer, Tile, MAX_EXTENT, MVT_EXTENT, MVT_VERSION};
use super::projection::{points_in_tile, LngLat};

/// Default name of the single layer in every tile.
pub const DEFAULT_LAYER_NAME: &str = "points";

// =============================================================================
// Tile Options
// =============================================================================

/// Layer settings shared by every tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileOptions {
    /// Name of the layer holding the points
    pub layer_name: String,

    /// Coordinate resolution of the layer
    pub extent: u32,
}

impl Default for TileOptions {
    fn default() -> Self {
        Self {
            layer_name: DEFAULT_LAYER_NAME.to_string(),
            extent: MVT_EXTENT,
        }
    }
}

impl TileOptions {
    pub fn with_layer_name(mut self, name: impl Into<String>) -> Self {
        self.layer_name = name.into();
        self
    }

    /// Set the layer extent, clamped to [`MAX_EXTENT`].
    pub fn with_extent(mut self, extent: u32) -> Self {
        self.extent = extent.min(MAX_EXTENT);
        self
    }
}

// =============================================================================
// Tile Assembler
// =============================================================================

/// Builds point tiles from an ordered point collection.
#[derive(Debug, Clone, Default)]
pub struct TileAssembler {
    options: TileOptions,
}

impl TileAssembler {
    pub fn new(options: TileOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TileOptions {
        &self.options
    }

    /// Build the layer for `tile`, or `None` if no point falls inside it.
    pub fn layer(&self, tile: TileId, points: &[LngLat]) -> Option<Layer> {
        self.counted_layer(tile, points).map(|(layer, _)| layer)
    }

    /// Like [`TileAssembler::layer`], also returning how many points it holds.
    pub fn counted_layer(&self, tile: TileId, points: &[LngLat]) -> Option<(Layer, usize)> {
        let inside = points_in_tile(points, tile);
        let geometry = encode_points(&inside, self.options.extent)?;

        let layer = Layer {
            version: MVT_VERSION,
            name: self.options.layer_name.clone(),
            extent: Some(self.options.extent),
            features: vec![Feature {
                id: None,
                tags: Vec::new(),
                r#type: Some(GeomType::Point as i32),
                geometry,
            }],
            ..Layer::default()
        };

        Some((layer, inside.len()))
    }

    /// Build and serialize the tile.
    ///
    /// Returns `Ok(None)` for a tile without points.
    pub fn assemble(&self, tile: TileId, points: &[LngLat]) -> Result<Option<Bytes>, TileError> {
        self.layer(tile, points)
            .map(|layer| encode_tile(&Tile::from(layer)))
            .transpose()
    }
}

/// Serialize a tile to its protobuf wire form.
pub fn encode_tile(tile: &Tile) -> Result<Bytes, TileError> {
    let mut buf = BytesMut::with_capacity(tile.encoded_len());
    tile.encode(&mut buf)?;
    Ok(buf.freeze())
}

// =============================================================================
// Tests
// =============================================================================
