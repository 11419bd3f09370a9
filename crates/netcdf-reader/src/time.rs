//! CF-style decoding of the dataset's `time` coordinate.
//!
//! Rainfall files store time as a raw number plus a `units` attribute of the
//! form `"<unit> since <instant>"` (e.g. `"hours since 2024-01-01 00:00:00"`).

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Decode a raw time value against its CF units string.
///
/// Falls back to interpreting the raw value as Unix seconds when the units
/// attribute is absent or unparseable.
pub(crate) fn decode_time(raw: f64, units: Option<&str>) -> Option<DateTime<Utc>> {
    if let Some(units) = units {
        if let Some(ts) = decode_cf(raw, units) {
            return Some(ts);
        }
        tracing::debug!(units, "Unrecognized time units, treating value as Unix seconds");
    }
    Utc.timestamp_opt(raw as i64, 0).single()
}

fn decode_cf(raw: f64, units: &str) -> Option<DateTime<Utc>> {
    let (unit, origin) = units.split_once(" since ")?;
    let epoch = parse_origin(origin.trim())?;

    let seconds_per = match unit.trim().to_ascii_lowercase().as_str() {
        "seconds" | "second" | "secs" | "sec" | "s" => 1.0,
        "minutes" | "minute" | "mins" | "min" => 60.0,
        "hours" | "hour" | "hrs" | "hr" | "h" => 3600.0,
        "days" | "day" | "d" => 86400.0,
        _ => return None,
    };

    let millis = (raw * seconds_per * 1000.0).round() as i64;
    Some(epoch + Duration::milliseconds(millis))
}

fn parse_origin(origin: &str) -> Option<DateTime<Utc>> {
    let origin = origin
        .trim_end_matches(" UTC")
        .trim_end_matches('Z')
        .trim();

    if let Ok(dt) = NaiveDateTime::parse_from_str(origin, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&dt));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(origin, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&dt));
    }
    if let Ok(d) = NaiveDate::parse_from_str(origin, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&d.and_hms_opt(0, 0, 0)?));
    }
    None
}
