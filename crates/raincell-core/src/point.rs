//! A single filtered rainfall observation.

use serde::{Deserialize, Serialize};

/// One grid cell that passed the range filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RainPoint {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Rainfall in millimetres, rounded to 2 decimal places.
    pub mm: f64,
}
