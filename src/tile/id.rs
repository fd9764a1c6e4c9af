//! Slippy-map tile addresses.
//!
//! A tile is addressed as `{z}/{x}/{y}`: zoom level `z` divides the world
//! into `2^z × 2^z` tiles, `x` counts columns from the antimeridian eastwards
//! and `y` counts rows from the north edge southwards.
//!
//! # Path Matching
//!
//! [`TileId::from_path`] searches a request path for the first
//! `<digits>/<digits>/<digits>` sequence. Anything before the match is
//! ignored and the match does not need to reach the end of the string, so
//! all of the following resolve to `TileId { z: 14, x: 2620, y: 6332 }`:
//!
//! ```text
//! 14/2620/6332
//! tiles/14/2620/6332
//! 14/2620/6332.pbf
//! ```

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::error::TileIdError;

use super::projection::LngLat;

// =============================================================================
// Tile Identifier
// =============================================================================

/// Address of a single tile in the slippy-map scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId {
    /// Column, 0 at the antimeridian (-180°)
    pub x: u32,

    /// Row, 0 at the northern edge of the Mercator square
    pub y: u32,

    /// Zoom level
    pub z: u32,
}

impl TileId {
    /// Create a tile address.
    pub fn new(z: u32, x: u32, y: u32) -> Self {
        Self { x, y, z }
    }

    /// Parse the first `{z}/{x}/{y}` sequence found in `path`.
    ///
    /// No check against `2^z` is made here; see [`TileId::is_valid`].
    ///
    /// # Errors
    ///
    /// - [`TileIdError::NoMatch`] if the path holds no such sequence
    /// - [`TileIdError::Overflow`] if a component does not fit in a `u32`
    pub fn from_path(path: &str) -> Result<Self, TileIdError> {
        let [z, x, y] = find_tile_components(path).ok_or_else(|| TileIdError::NoMatch {
            path: path.to_string(),
        })?;

        let x = parse_component(x, "x")?;
        let y = parse_component(y, "y")?;
        let z = parse_component(z, "z")?;

        Ok(Self { x, y, z })
    }

    /// Number of tiles along one axis at this zoom level.
    ///
    /// Returns `None` once the count no longer fits in a `u64`.
    pub fn tiles_per_axis(&self) -> Option<u64> {
        1u64.checked_shl(self.z)
    }

    /// Whether `x` and `y` both address an existing tile at zoom `z`.
    pub fn is_valid(&self) -> bool {
        match self.tiles_per_axis() {
            Some(n) => u64::from(self.x) < n && u64::from(self.y) < n,
            // 2^z exceeds every u32 column/row
            None => true,
        }
    }

    /// Geographic bounding box of this tile as `(north_west, south_east)`.
    pub fn bounds(&self) -> (LngLat, LngLat) {
        let n = 2f64.powf(f64::from(self.z));

        let lng = |x: f64| x / n * 360.0 - 180.0;
        let lat = |y: f64| (PI * (1.0 - 2.0 * y / n)).sinh().atan().to_degrees();

        let x = f64::from(self.x);
        let y = f64::from(self.y);

        (
            LngLat::new(lng(x), lat(y)),
            LngLat::new(lng(x + 1.0), lat(y + 1.0)),
        )
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

impl FromStr for TileId {
    type Err = TileIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_path(s)
    }
}

// =============================================================================
// Path Scanning
// =============================================================================

fn parse_component(digits: &str, component: &'static str) -> Result<u32, TileIdError> {
    digits
        .parse()
        .map_err(|source| TileIdError::Overflow { component, source })
}

/// Locate the leftmost `<digits>/<digits>/<digits>` run and return the three
/// digit slices in path order (`z`, `x`, `y`).
fn find_tile_components(path: &str) -> Option<[&str; 3]> {
    let bytes = path.as_bytes();
    let mut start = 0;

    while start < bytes.len() {
        if !bytes[start].is_ascii_digit() {
            start += 1;
            continue;
        }

        // A match can only begin where a digit run begins: starting inside a
        // run meets the same terminator as starting at its head.
        if let Some(components) = match_at(path, start) {
            return Some(components);
        }

        start += digit_run(bytes, start);
    }

    None
}

fn match_at(path: &str, start: usize) -> Option<[&str; 3]> {
    let bytes = path.as_bytes();
    let mut components = [""; 3];
    let mut pos = start;

    for (i, component) in components.iter_mut().enumerate() {
        let len = digit_run(bytes, pos);
        if len == 0 {
            return None;
        }
        *component = &path[pos..pos + len];
        pos += len;

        if i < 2 {
            if bytes.get(pos) != Some(&b'/') {
                return None;
            }
            pos += 1;
        }
    }

    Some(components)
}

fn digit_run(bytes: &[u8], from: usize) -> usize {
    bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count()
}

// =============================================================================
// Tests
// =============================================================================
