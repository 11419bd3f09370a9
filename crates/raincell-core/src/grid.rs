//! In-memory representation of a rainfall grid dataset.

use chrono::{DateTime, Utc};

/// The leading time slice of a rainfall dataset.
///
/// Holds the coordinate arrays plus a row-major (lat outer, lon inner)
/// slice of rainfall values. Built by the reader, consumed by the
/// extractor, never mutated.
#[derive(Debug, Clone)]
pub struct RainGrid {
    /// Latitude values in degrees.
    pub lats: Vec<f64>,
    /// Longitude values in degrees.
    pub lons: Vec<f64>,
    /// Rainfall values in mm, length `lats.len() * lons.len()`.
    pub values: Vec<f64>,
    /// Observation time of the leading time index, if the dataset has one.
    pub timestamp: Option<DateTime<Utc>>,
}

impl RainGrid {
    /// Rainfall value at a (lat-index, lon-index) pair.
    pub fn value_at(&self, lat_idx: usize, lon_idx: usize) -> f64 {
        self.values[lat_idx * self.lons.len() + lon_idx]
    }

    /// Observation time rendered at second granularity
    /// (`YYYY-MM-DDTHH:MM:SS`).
    pub fn timestamp_string(&self) -> Option<String> {
        self.timestamp
            .map(|t| t.format("%Y-%m-%dT%H:%M:%S").to_string())
    }
}
