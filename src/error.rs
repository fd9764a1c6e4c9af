use std::num::ParseIntError;

use thiserror::Error;

/// Errors produced while turning a request path into a tile address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TileIdError {
    /// The path contains no `{z}/{x}/{y}` sequence
    #[error("unable to parse path as tile: {path}")]
    NoMatch { path: String },

    /// A path component does not fit in an unsigned 32-bit integer
    #[error("tile {component} component is out of range: {source}")]
    Overflow {
        component: &'static str,
        #[source]
        source: ParseIntError,
    },

    /// Tile column or row does not exist at the requested zoom level
    #[error("tile {z}/{x}/{y} does not exist at zoom {z}")]
    OutOfRange { x: u32, y: u32, z: u32 },
}

/// Errors that can occur while building a tile
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TileError {
    /// The requested tile address is invalid
    #[error("invalid tile: {0}")]
    InvalidTile(#[from] TileIdError),

    /// The tile structure could not be serialized
    #[error("failed to encode tile: {0}")]
    Encode(#[from] prost::EncodeError),
}

/// Errors that can occur when loading the point file
#[derive(Debug, Error)]
pub enum PointsError {
    /// The point file could not be opened or read
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The CSV structure is malformed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row
    #[error("missing column '{0}' in header row")]
    MissingColumn(String),
}

/// Errors found while decoding an MVT geometry command stream
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// Command id outside MoveTo, LineTo and ClosePath
    #[error("unknown geometry command id {id} at index {index}")]
    UnknownCommand { id: u32, index: usize },

    /// A command announced more parameters than the stream holds
    #[error("geometry stream ends inside the parameters of the command at index {index}")]
    Truncated { index: usize },
}
