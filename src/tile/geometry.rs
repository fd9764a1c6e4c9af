//! MVT geometry command encoding.
//!
//! A geometry is a flat `u32` stream of command integers, each followed by
//! its zigzag-encoded parameters. Parameters are deltas from a cursor that
//! starts at `(0, 0)` and moves to every vertex it visits.
//!
//! ```text
//!  command     = (id & 0x7) | (count << 3)
//!  parameter   = (delta << 1) ^ (delta >> 31)
//! ```
//!
//! See <https://github.com/mapbox/vector-tile-spec/tree/master/2.1#43-geometry-encoding>.

use crate::error::GeometryError;

use super::projection::TilePoint;

// =============================================================================
// Commands
// =============================================================================

/// Geometry command ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Command {
    MoveTo = 1,
    LineTo = 2,
    ClosePath = 7,
}

impl Command {
    /// Encode this command with a repeat count.
    #[inline]
    pub fn encode(self, count: u32) -> u32 {
        command_encode(self as u32, count)
    }

    /// Number of parameter pairs following each repetition.
    pub fn parameter_pairs(self) -> usize {
        match self {
            Command::MoveTo | Command::LineTo => 1,
            Command::ClosePath => 0,
        }
    }
}

impl TryFrom<u32> for Command {
    type Error = u32;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(Command::MoveTo),
            2 => Ok(Command::LineTo),
            7 => Ok(Command::ClosePath),
            other => Err(other),
        }
    }
}

/// Pack a 3-bit command id and a repeat count into a command integer.
///
/// Counts wider than 29 bits are truncated.
#[inline]
pub fn command_encode(id: u32, count: u32) -> u32 {
    (id & 0x7) | (count << 3)
}

/// Split a command integer into `(id, count)`.
#[inline]
pub fn command_decode(encoded: u32) -> (u32, u32) {
    (encoded & 0x7, encoded >> 3)
}

/// Zigzag-encode a signed parameter.
#[inline]
pub fn zigzag(value: i32) -> u32 {
    ((value << 1) ^ (value >> 31)) as u32
}

/// Inverse of [`zigzag`].
#[inline]
pub fn unzigzag(value: u32) -> i32 {
    ((value >> 1) as i32) ^ -((value & 1) as i32)
}

// =============================================================================
// Point Encoding
// =============================================================================

/// Largest repeat count a command integer can carry (29 bits).
pub const MAX_COMMAND_COUNT: u32 = (1 << 29) - 1;

/// Encode tile-local points as a single MVT point geometry.
///
/// Each point is scaled to `extent` integer units, rounded half-up, and
/// written as a delta from the previous one under a `MoveTo`. Runs longer
/// than [`MAX_COMMAND_COUNT`] continue under further `MoveTo` commands with
/// the cursor carried over. Returns `None` when `points` is empty.
///
/// `extent` must not exceed `i32::MAX`.
pub fn encode_points(points: &[TilePoint], extent: u32) -> Option<Vec<u32>> {
    encode_points_in_runs(points, extent, MAX_COMMAND_COUNT as usize)
}

fn encode_points_in_runs(points: &[TilePoint], extent: u32, max_run: usize) -> Option<Vec<u32>> {
    if points.is_empty() {
        return None;
    }

    let extent = f64::from(extent);
    let runs = points.len().div_ceil(max_run);
    let mut geometry = Vec::with_capacity(runs + points.len() * 2);

    let (mut cursor_x, mut cursor_y) = (0i32, 0i32);
    for run in points.chunks(max_run) {
        geometry.push(Command::MoveTo.encode(run.len() as u32));

        for point in run {
            let x = (extent * point.x + 0.5).floor() as i32;
            let y = (extent * point.y + 0.5).floor() as i32;

            geometry.push(zigzag(x.wrapping_sub(cursor_x)));
            geometry.push(zigzag(y.wrapping_sub(cursor_y)));

            cursor_x = x;
            cursor_y = y;
        }
    }

    Some(geometry)
}

/// Decode a command stream into the absolute integer vertices it visits.
///
/// `ClosePath` adds no vertex.
pub fn decode_geometry(geometry: &[u32]) -> Result<Vec<(i32, i32)>, GeometryError> {
    let mut vertices = Vec::new();
    let (mut x, mut y) = (0i32, 0i32);
    let mut index = 0;

    while index < geometry.len() {
        let (id, count) = command_decode(geometry[index]);
        let command =
            Command::try_from(id).map_err(|id| GeometryError::UnknownCommand { id, index })?;

        let params = count as usize * command.parameter_pairs() * 2;
        let body = geometry
            .get(index + 1..index + 1 + params)
            .ok_or(GeometryError::Truncated { index })?;

        for pair in body.chunks_exact(2) {
            x = x.wrapping_add(unzigzag(pair[0]));
            y = y.wrapping_add(unzigzag(pair[1]));
            vertices.push((x, y));
        }

        index += 1 + params;
    }

    Ok(vertices)
}

// =============================================================================
// Tests
// =============================================================================
