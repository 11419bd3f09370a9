//! Range filtering and subsampling of rainfall grids.

use rand::seq::index;
use rand::Rng;

use crate::grid::RainGrid;
use crate::point::RainPoint;

/// Round a raw rainfall value to 2 decimal places for presentation.
fn round_mm(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Extract the grid cells whose rainfall lies in `[min_mm, max_mm]`.
///
/// Scans every (lat-index, lon-index) pair in row-major order and emits a
/// [`RainPoint`] for each value inside the closed range. NaN values (the
/// NetCDF fill marker) never satisfy the comparison and are skipped, as are
/// all values when the bounds are inverted.
///
/// When more than `max_points` cells qualify, exactly `max_points` of them
/// are drawn uniformly at random without replacement; the order of the
/// sampled result is unspecified. Below the cap the full candidate list is
/// returned in scan order.
pub fn extract_cells<R: Rng>(
    grid: &RainGrid,
    min_mm: f64,
    max_mm: f64,
    max_points: usize,
    rng: &mut R,
) -> Vec<RainPoint> {
    let mut points = Vec::new();

    for (i, &lat) in grid.lats.iter().enumerate() {
        for (j, &lon) in grid.lons.iter().enumerate() {
            let value = grid.value_at(i, j);
            if value >= min_mm && value <= max_mm {
                points.push(RainPoint {
                    lat,
                    lon,
                    mm: round_mm(value),
                });
            }
        }
    }

    if points.len() > max_points {
        let picked = index::sample(rng, points.len(), max_points);
        let sampled: Vec<RainPoint> = picked.into_iter().map(|i| points[i].clone()).collect();
        points = sampled;
    }

    points
}
