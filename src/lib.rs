//! # vtile-server
//!
//! A tile server that renders a point data set as Mapbox Vector Tiles on demand.
//!
//! Every request for `/tiles/{z}/{x}/{y}` projects the loaded points into the
//! requested Web-Mercator tile and returns a protobuf-encoded tile with a
//! single layer holding one multi-point feature. Tiles are computed per
//! request; nothing is pre-rendered or cached on the server.
//!
//! ## Features
//!
//! - **Any point file**: CSV input with configurable coordinate columns
//! - **Standard tiles**: MVT version 2 payloads readable by any vector map client
//! - **Browser friendly**: Permissive CORS for `GET`, `POST` and `OPTIONS`
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`points`] - Point loading and the shared read-only point set
//! - [`tile`] - Tile addressing, projection, geometry encoding and assembly
//! - [`server`] - Axum-based HTTP server and routes
//! - [`config`] - CLI and configuration types
//! - [`error`] - Error types shared across modules
//!
//! ## Example
//!
//! ```rust,no_run
//! use vtile_server::{create_router, load_points, CsvColumns, RouterConfig, TileService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let points = load_points("trees.csv", &CsvColumns::default())?;
//!     let router = create_router(TileService::new(points), RouterConfig::new());
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//!     axum::serve(listener, router).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod points;
pub mod server;
pub mod tile;

// Re-export commonly used types
pub use config::{CheckConfig, Cli, ColumnArgs, Command, ServeConfig};
pub use error::{GeometryError, PointsError, TileError, TileIdError};
pub use points::{load_points, read_points, CsvColumns, PointSet};
pub use server::{create_router, health_handler, tile_handler, AppState, RouterConfig};
pub use tile::{
    LngLat, TileAssembler, TileId, TileOptions, TilePoint, TileResponse, TileService,
};
