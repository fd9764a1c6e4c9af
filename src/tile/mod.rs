//! Tile pipeline.
//!
//! This module turns a tile address and a point collection into a Mapbox
//! Vector Tile.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              HTTP Handlers              │
//! └────────────────────┬────────────────────┘
//!                      │ "14/2620/6332"
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │        TileId::from_path (id)           │
//! └────────────────────┬────────────────────┘
//!                      │ TileId
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │              Tile Service               │
//! │  ┌──────────────┐  ┌─────────────────┐  │
//! │  │  projection  │  │    geometry     │  │
//! │  │ (lng/lat →   │─▶│ (MoveTo +       │  │
//! │  │  tile-local) │  │  zigzag deltas) │  │
//! │  └──────────────┘  └────────┬────────┘  │
//! │                             ▼           │
//! │                 ┌─────────────────────┐ │
//! │                 │ assembler + mvt     │ │
//! │                 │ (layer → protobuf)  │ │
//! │                 └─────────────────────┘ │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`TileId`]: Tile address and `{z}/{x}/{y}` path parsing
//! - [`lng_lat_to_tile`] / [`tile_to_lng_lat`]: Web-Mercator projection
//! - [`encode_points`]: MVT command and zigzag parameter encoding
//! - [`TileAssembler`]: Single-layer, single-feature tile construction
//! - [`TileService`]: Entry point used by the HTTP layer
//!
//! # Example
//!
//! ```
//! use vtile_server::tile::{LngLat, TileAssembler, TileId};
//!
//! let assembler = TileAssembler::default();
//! let tile = TileId::from_path("tiles/0/0/0").unwrap();
//!
//! let bytes = assembler.assemble(tile, &[LngLat::new(0.0, 0.0)]).unwrap();
//! assert!(bytes.is_some());
//!
//! // No point inside the tile: no payload
//! let empty = assembler.assemble(TileId::new(3, 0, 0), &[LngLat::new(0.0, 0.0)]).unwrap();
//! assert!(empty.is_none());
//! ```

mod assembler;
pub mod geometry;
mod id;
pub mod mvt;
mod projection;
mod service;

pub use assembler::{encode_tile, TileAssembler, TileOptions, DEFAULT_LAYER_NAME};
pub use geometry::{
    command_decode, command_encode, decode_geometry, encode_points, unzigzag, zigzag, Command,
    MAX_COMMAND_COUNT,
};
pub use id::TileId;
pub use mvt::{GeomType, MAX_EXTENT, MVT_EXTENT, MVT_VERSION};
pub use projection::{lng_lat_to_tile, points_in_tile, tile_to_lng_lat, LngLat, TilePoint};
pub use service::{TileResponse, TileService};
