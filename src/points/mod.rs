//! Point source.
//!
//! The point collection is loaded once at startup and then shared, read-only,
//! by every request handler. [`PointSet`] wraps it in an `Arc<[LngLat]>` so
//! cloning it into handler state is a reference-count bump.
//!
//! ```text
//! ┌──────────────┐   load_points()   ┌──────────┐   clone   ┌──────────────┐
//! │  trees.csv   │ ────────────────▶ │ PointSet │ ────────▶ │ TileService  │
//! └──────────────┘                   └──────────┘           └──────────────┘
//! ```

mod loader;

use std::ops::Deref;
use std::sync::Arc;

use crate::tile::LngLat;

pub use loader::{load_points, read_points, CsvColumns, DEFAULT_LAT_COLUMN, DEFAULT_LNG_COLUMN};

/// Immutable, shareable snapshot of the input points in source order.
#[derive(Debug, Clone)]
pub struct PointSet {
    points: Arc<[LngLat]>,
}

impl PointSet {
    pub fn new(points: impl Into<Arc<[LngLat]>>) -> Self {
        Self {
            points: points.into(),
        }
    }

    /// Smallest box containing every point, as `(south_west, north_east)`.
    ///
    /// `None` when the set is empty.
    pub fn extent(&self) -> Option<(LngLat, LngLat)> {
        let first = *self.points.first()?;
        let init = (first, first);

        Some(self.points.iter().fold(init, |(min, max), p| {
            (
                LngLat::new(min.lng.min(p.lng), min.lat.min(p.lat)),
                LngLat::new(max.lng.max(p.lng), max.lat.max(p.lat)),
            )
        }))
    }
}

impl Deref for PointSet {
    type Target = [LngLat];

    fn deref(&self) -> &Self::Target {
        &self.points
    }
}

impl From<Vec<LngLat>> for PointSet {
    fn from(points: Vec<LngLat>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<LngLat> for PointSet {
    fn from_iter<I: IntoIterator<Item = LngLat>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect::<Vec<_>>())
    }
}
