//! Application state for the raincell map API.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// File extension of the grid datasets served by this API.
const DATA_EXTENSION: &str = "nc";

/// Shared application state.
///
/// Built once at startup and never mutated afterwards; request handlers only
/// read from it, so no locking is needed.
pub struct AppState {
    /// Directory holding the NetCDF datasets.
    pub data_dir: PathBuf,

    /// Sorted dataset filenames found at startup.
    pub files: Vec<String>,

    /// Cap on the number of points returned per request.
    pub max_points: usize,
}

impl AppState {
    /// Scan the data directory and build the immutable file list.
    ///
    /// Fails when the directory is missing or holds no `.nc` files; the
    /// process must not start without data to serve.
    pub fn new(data_dir: impl Into<PathBuf>, max_points: usize) -> Result<Self> {
        let data_dir = data_dir.into();

        if !data_dir.is_dir() {
            bail!("Data directory not found: {}", data_dir.display());
        }

        let mut files = Vec::new();
        for entry in std::fs::read_dir(&data_dir)
            .with_context(|| format!("Failed to read directory: {}", data_dir.display()))?
        {
            let entry = entry?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == DATA_EXTENSION) {
                if let Some(name) = path.file_name().and_then(|s| s.to_str()) {
                    files.push(name.to_string());
                }
            }
        }
        files.sort();

        if files.is_empty() {
            bail!("No .{} files found in {}", DATA_EXTENSION, data_dir.display());
        }

        Ok(Self {
            data_dir,
            files,
            max_points,
        })
    }
}
