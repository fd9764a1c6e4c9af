//! CSV point loader.
//!
//! Reads a CSV file with a header row and extracts one [`LngLat`] per record
//! from the configured latitude and longitude columns. Other columns are
//! ignored. Records whose coordinates are missing or not numeric are skipped
//! and counted rather than placed at `(0, 0)`.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::PointsError;
use crate::tile::LngLat;

use super::PointSet;

/// Default latitude column header.
pub const DEFAULT_LAT_COLUMN: &str = "Latitude";

/// Default longitude column header.
pub const DEFAULT_LNG_COLUMN: &str = "Longitude";

// =============================================================================
// Column Selection
// =============================================================================

/// Header names of the coordinate columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvColumns {
    pub lat: String,
    pub lng: String,
}

impl Default for CsvColumns {
    fn default() -> Self {
        Self {
            lat: DEFAULT_LAT_COLUMN.to_string(),
            lng: DEFAULT_LNG_COLUMN.to_string(),
        }
    }
}

impl CsvColumns {
    pub fn new(lat: impl Into<String>, lng: impl Into<String>) -> Self {
        Self {
            lat: lat.into(),
            lng: lng.into(),
        }
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Load points from the CSV file at `path`.
pub fn load_points(path: impl AsRef<Path>, columns: &CsvColumns) -> Result<PointSet, PointsError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| PointsError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let points = read_points(file, columns)?;
    info!(path = %path.display(), points = points.len(), "Loaded point file");

    Ok(points)
}

/// Read points from any CSV source, preserving record order.
pub fn read_points<R: Read>(reader: R, columns: &CsvColumns) -> Result<PointSet, PointsError> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = csv_reader.headers()?;
    let lat_index = column_index(headers, &columns.lat)?;
    let lng_index = column_index(headers, &columns.lng)?;

    let mut points = Vec::new();
    let mut skipped = 0usize;

    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;

        let lat = record.get(lat_index).and_then(parse_coordinate);
        let lng = record.get(lng_index).and_then(parse_coordinate);

        match (lng, lat) {
            (Some(lng), Some(lat)) => points.push(LngLat::new(lng, lat)),
            _ => {
                // Row numbers are 1-based and exclude the header
                debug!(row = row + 1, "Skipping record without usable coordinates");
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        warn!(
            skipped,
            loaded = points.len(),
            "Skipped records with missing or invalid coordinates"
        );
    }

    Ok(PointSet::from(points))
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize, PointsError> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| PointsError::MissingColumn(name.to_string()))
}

fn parse_coordinate(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

// =============================================================================
// Tests
// =============================================================================
