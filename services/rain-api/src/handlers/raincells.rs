//! Raincell data endpoint: picks a dataset and returns filtered points.

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use netcdf_reader::ReadOutcome;
use raincell_core::{extract_cells, RainPoint};

use crate::state::AppState;

/// Query parameters for the raincells endpoint.
#[derive(Debug, Deserialize)]
pub struct RaincellsParams {
    /// Lower bound of the rainfall range in mm, inclusive.
    #[serde(default = "default_min_mm")]
    pub min_mm: f64,

    /// Upper bound of the rainfall range in mm, inclusive.
    #[serde(default = "default_max_mm")]
    pub max_mm: f64,
}

fn default_min_mm() -> f64 {
    0.0
}

fn default_max_mm() -> f64 {
    9999.0
}

/// Response payload for the raincells endpoint.
#[derive(Debug, Serialize)]
pub struct RaincellsResponse {
    /// Name of the dataset file this response was drawn from.
    pub file: String,
    /// Observation time, absent when the file had no usable data.
    pub timestamp: Option<String>,
    /// Filtered (and possibly subsampled) points.
    pub data: Vec<RainPoint>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// GET /raincells
///
/// Picks one dataset uniformly at random from the startup file list, filters
/// its leading time slice by the requested range, and caps the result at the
/// configured point limit. A file that fails to read degrades to an empty
/// `200` response rather than failing the request.
pub async fn raincells_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<RaincellsParams>,
) -> Response {
    // The list is validated non-empty at startup; an empty list here means
    // the state was constructed without going through AppState::new.
    let Some(file) = state.files.choose(&mut rand::thread_rng()).cloned() else {
        return error_response("No datasets available");
    };

    let path = state.data_dir.join(&file);
    let (data, timestamp) = match netcdf_reader::read_rain_grid(&path) {
        Ok(ReadOutcome::Grid(grid)) => {
            let timestamp = grid.timestamp_string();
            let points = extract_cells(
                &grid,
                params.min_mm,
                params.max_mm,
                state.max_points,
                &mut rand::thread_rng(),
            );
            (points, timestamp)
        }
        Ok(ReadOutcome::MissingRainfall) => {
            tracing::debug!(file = %file, "Dataset has no Rainfall variable");
            (Vec::new(), None)
        }
        Err(e) => {
            // A bad file must not fail the request; serve an empty result.
            tracing::warn!(file = %file, error = %e, "Failed to read dataset");
            (Vec::new(), None)
        }
    };

    (
        StatusCode::OK,
        Json(RaincellsResponse {
            file,
            timestamp,
            data,
        }),
    )
        .into_response()
}

fn error_response(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}
