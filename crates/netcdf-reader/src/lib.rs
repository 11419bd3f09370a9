//! NetCDF reading for rainfall grid datasets.
//!
//! Rainfall files carry a 3-D `Rainfall` variable shaped `[time, lat, lon]`
//! together with 1-D `lat`/`lon` coordinate arrays and a CF-style `time`
//! coordinate. Only the leading time slice is ever served, so that is all
//! this crate reads.

use std::path::Path;
use std::sync::Once;

use chrono::{DateTime, Utc};
use raincell_core::RainGrid;

mod error;
mod time;

pub use error::{NetCdfError, NetCdfResult};

/// Name of the rainfall data variable.
pub const RAINFALL_VAR: &str = "Rainfall";

const LAT_VAR: &str = "lat";
const LON_VAR: &str = "lon";
const TIME_VAR: &str = "time";

/// Result of reading a dataset that may lack the rainfall variable.
///
/// A file without `Rainfall` is a valid file that simply has nothing to
/// serve; it is reported distinctly from read failures so callers can log
/// the two cases differently.
#[derive(Debug)]
pub enum ReadOutcome {
    /// The leading time slice of the rainfall grid.
    Grid(RainGrid),
    /// The file opened cleanly but carries no `Rainfall` variable.
    MissingRainfall,
}

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints verbose error messages to stderr even when
/// errors are handled gracefully by the Rust code (e.g. when probing for
/// optional attributes). This disables that output via H5Eset_auto2; it only
/// needs to run once per process but is safe to call repeatedly.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 is thread-safe and we're passing null pointers
        // to disable error output, which is a documented valid use.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// Read the leading time slice of a rainfall dataset.
///
/// The file handle is scoped to this call and released on every exit path.
pub fn read_rain_grid<P: AsRef<Path>>(path: P) -> NetCdfResult<ReadOutcome> {
    silence_hdf5_errors();

    let nc_file = netcdf::open(path.as_ref())
        .map_err(|e| NetCdfError::InvalidFormat(format!("Failed to open NetCDF: {}", e)))?;

    let Some(rain_var) = nc_file.variable(RAINFALL_VAR) else {
        return Ok(ReadOutcome::MissingRainfall);
    };

    let lats: Vec<f64> = nc_file
        .variable(LAT_VAR)
        .ok_or_else(|| NetCdfError::MissingData("lat variable".to_string()))?
        .get_values(..)
        .map_err(|e| NetCdfError::InvalidFormat(format!("Failed to read lat: {}", e)))?;

    let lons: Vec<f64> = nc_file
        .variable(LON_VAR)
        .ok_or_else(|| NetCdfError::MissingData("lon variable".to_string()))?
        .get_values(..)
        .map_err(|e| NetCdfError::InvalidFormat(format!("Failed to read lon: {}", e)))?;

    let dims = rain_var.dimensions();
    if dims.len() != 3 {
        return Err(NetCdfError::InvalidFormat(format!(
            "Rainfall variable has {} dimensions, expected [time, lat, lon]",
            dims.len()
        )));
    }
    if dims[0].len() == 0 {
        return Err(NetCdfError::MissingData(
            "time steps in Rainfall variable".to_string(),
        ));
    }
    if dims[1].len() != lats.len() || dims[2].len() != lons.len() {
        return Err(NetCdfError::InvalidFormat(format!(
            "Rainfall grid is {}x{} but coordinates are {}x{}",
            dims[1].len(),
            dims[2].len(),
            lats.len(),
            lons.len()
        )));
    }

    // Read only the leading time slice.
    let values: Vec<f64> = rain_var
        .get_values((0, .., ..))
        .map_err(|e| NetCdfError::InvalidFormat(format!("Failed to read Rainfall: {}", e)))?;

    let timestamp = read_timestamp(&nc_file)?;

    Ok(ReadOutcome::Grid(RainGrid {
        lats,
        lons,
        values,
        timestamp: Some(timestamp),
    }))
}

/// Decode the observation time of the leading time index.
///
/// A rainfall grid always carries a timestamp; a dataset without a readable
/// `time` coordinate is malformed and fails the whole read.
fn read_timestamp(file: &netcdf::File) -> NetCdfResult<DateTime<Utc>> {
    let time_var = file
        .variable(TIME_VAR)
        .ok_or_else(|| NetCdfError::MissingData("time variable".to_string()))?;
    let raw: Vec<f64> = time_var
        .get_values(..)
        .map_err(|e| NetCdfError::InvalidFormat(format!("Failed to read time: {}", e)))?;
    let first = *raw
        .first()
        .ok_or_else(|| NetCdfError::MissingData("time values".to_string()))?;
    let units = get_str_attr(&time_var, "units");
    time::decode_time(first, units.as_deref())
        .ok_or_else(|| NetCdfError::InvalidFormat(format!("Undecodable time value: {}", first)))
}

/// Check if a variable has an attribute with the given name.
/// This avoids HDF5 error spam when probing for optional attributes.
fn has_attr(var: &netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

/// Helper to get a string attribute.
fn get_str_attr(var: &netcdf::Variable, name: &str) -> Option<String> {
    if !has_attr(var, name) {
        return None;
    }
    let attr_value = var.attribute_value(name)?.ok()?;
    match attr_value {
        netcdf::AttributeValue::Str(s) => Some(s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::path::PathBuf;

    /// Write a minimal rainfall file the way the production datasets are laid
    /// out: Rainfall[time, lat, lon] plus coordinate arrays and CF time.
    fn write_rain_file(
        path: &PathBuf,
        lats: &[f64],
        lons: &[f64],
        values: &[f64],
        time_units: Option<&str>,
        time_raw: f64,
    ) {
        let mut file = netcdf::create(path).unwrap();
        file.add_dimension("time", 1).unwrap();
        file.add_dimension("lat", lats.len()).unwrap();
        file.add_dimension("lon", lons.len()).unwrap();

        let mut lat_var = file.add_variable::<f64>("lat", &["lat"]).unwrap();
        lat_var.put_values(lats, ..).unwrap();

        let mut lon_var = file.add_variable::<f64>("lon", &["lon"]).unwrap();
        lon_var.put_values(lons, ..).unwrap();

        let mut time_var = file.add_variable::<f64>("time", &["time"]).unwrap();
        time_var.put_values(&[time_raw], ..).unwrap();
        if let Some(units) = time_units {
            time_var.put_attribute("units", units).unwrap();
        }

        let mut rain_var = file
            .add_variable::<f64>("Rainfall", &["time", "lat", "lon"])
            .unwrap();
        rain_var.put_values(values, ..).unwrap();
    }

    #[test]
    fn test_read_rain_grid_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rain.nc");
        write_rain_file(
            &path,
            &[10.0, 20.0],
            &[100.0, 110.0],
            &[0.5, 5.0, 12.0, 0.0],
            Some("hours since 2024-06-15 00:00:00"),
            6.0,
        );

        let outcome = read_rain_grid(&path).unwrap();
        let ReadOutcome::Grid(grid) = outcome else {
            panic!("expected a grid");
        };

        assert_eq!(grid.lats, vec![10.0, 20.0]);
        assert_eq!(grid.lons, vec![100.0, 110.0]);
        assert_eq!(grid.values, vec![0.5, 5.0, 12.0, 0.0]);
        assert_eq!(
            grid.timestamp.unwrap(),
            Utc.with_ymd_and_hms(2024, 6, 15, 6, 0, 0).unwrap()
        );
        assert_eq!(grid.timestamp_string().unwrap(), "2024-06-15T06:00:00");
    }

    #[test]
    fn test_missing_rainfall_variable_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.nc");

        let mut file = netcdf::create(&path).unwrap();
        file.add_dimension("lat", 1).unwrap();
        let mut lat_var = file.add_variable::<f64>("lat", &["lat"]).unwrap();
        lat_var.put_values(&[1.0], ..).unwrap();
        drop(file);

        let outcome = read_rain_grid(&path).unwrap();
        assert!(matches!(outcome, ReadOutcome::MissingRainfall));
    }

    #[test]
    fn test_missing_coordinates_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_coords.nc");

        let mut file = netcdf::create(&path).unwrap();
        file.add_dimension("time", 1).unwrap();
        file.add_dimension("lat", 1).unwrap();
        file.add_dimension("lon", 1).unwrap();
        let mut rain_var = file
            .add_variable::<f64>("Rainfall", &["time", "lat", "lon"])
            .unwrap();
        rain_var.put_values(&[1.0], ..).unwrap();
        drop(file);

        let err = read_rain_grid(&path).unwrap_err();
        assert!(matches!(err, NetCdfError::MissingData(_)));
    }

    #[test]
    fn test_wrong_rank_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flat.nc");

        let mut file = netcdf::create(&path).unwrap();
        file.add_dimension("lat", 2).unwrap();
        file.add_dimension("lon", 2).unwrap();
        let mut lat_var = file.add_variable::<f64>("lat", &["lat"]).unwrap();
        lat_var.put_values(&[1.0, 2.0], ..).unwrap();
        let mut lon_var = file.add_variable::<f64>("lon", &["lon"]).unwrap();
        lon_var.put_values(&[1.0, 2.0], ..).unwrap();
        let mut rain_var = file.add_variable::<f64>("Rainfall", &["lat", "lon"]).unwrap();
        rain_var.put_values(&[1.0, 2.0, 3.0, 4.0], ..).unwrap();
        drop(file);

        let err = read_rain_grid(&path).unwrap_err();
        assert!(matches!(err, NetCdfError::InvalidFormat(_)));
    }

    #[test]
    fn test_missing_time_variable_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_time.nc");

        let mut file = netcdf::create(&path).unwrap();
        file.add_dimension("time", 1).unwrap();
        file.add_dimension("lat", 1).unwrap();
        file.add_dimension("lon", 1).unwrap();
        let mut lat_var = file.add_variable::<f64>("lat", &["lat"]).unwrap();
        lat_var.put_values(&[1.0], ..).unwrap();
        let mut lon_var = file.add_variable::<f64>("lon", &["lon"]).unwrap();
        lon_var.put_values(&[2.0], ..).unwrap();
        let mut rain_var = file
            .add_variable::<f64>("Rainfall", &["time", "lat", "lon"])
            .unwrap();
        rain_var.put_values(&[3.0], ..).unwrap();
        drop(file);

        // No time coordinate means the dataset invariant is broken; the
        // request layer must see a failure and serve an empty result.
        let err = read_rain_grid(&path).unwrap_err();
        assert!(matches!(err, NetCdfError::MissingData(_)));
    }

    #[test]
    fn test_unreadable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not_netcdf.nc");
        std::fs::write(&path, b"this is not a netcdf file").unwrap();

        assert!(read_rain_grid(&path).is_err());
    }

    #[test]
    fn test_nonexistent_path_is_an_error() {
        assert!(read_rain_grid("/definitely/not/here.nc").is_err());
    }

    #[test]
    fn test_missing_time_units_falls_back_to_unix_seconds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_units.nc");
        write_rain_file(&path, &[1.0], &[2.0], &[3.0], None, 1_700_000_000.0);

        let ReadOutcome::Grid(grid) = read_rain_grid(&path).unwrap() else {
            panic!("expected a grid");
        };
        assert_eq!(grid.timestamp.unwrap().timestamp(), 1_700_000_000);
    }
}
