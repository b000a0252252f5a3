//! Waypoint producers: CSV import and manual-entry normalization.
//!
//! Every producer funnels through [`Track::new`], so inadmissible paths are
//! rejected in one place instead of scattering parsing assumptions across
//! the playback core.

use std::io;

use serde::Deserialize;
use thiserror::Error;

use crate::models::Waypoint;
use crate::track::{Track, TrackError};

/// Seconds assigned per point when a producer omits timestamps.
const DEFAULT_SECONDS_PER_POINT: f64 = 5.0;

/// Sample of the accepted CSV format.
pub const SAMPLE_CSV: &str = "lat,lng,timestamp\n\
28.7041,77.1025,0\n\
28.7045,77.1030,5\n\
28.7050,77.1035,10\n\
28.7055,77.1040,15\n";

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read CSV input")]
    Csv(#[from] csv::Error),
    #[error("no valid waypoints found")]
    NoWaypoints,
    #[error(transparent)]
    Track(#[from] TrackError),
}

/// One CSV row as producers spell it. Alias headers cover the common
/// latitude/longitude variants; missing cells deserialize to `None`.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default, alias = "latitude")]
    lat: Option<f64>,
    #[serde(default, alias = "longitude", alias = "lon")]
    lng: Option<f64>,
    #[serde(default, alias = "time")]
    timestamp: Option<f64>,
}

/// Parse a CSV table into a validated track.
///
/// Rows missing a latitude or longitude are dropped silently, as are rows
/// whose cells fail to parse; missing timestamps default to
/// [`DEFAULT_SECONDS_PER_POINT`] seconds per accepted point.
pub fn read_track_csv<R: io::Read>(reader: R) -> Result<Track, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let mut points = Vec::new();
    for row in csv_reader.deserialize::<CsvRow>() {
        let row = match row {
            Ok(row) => row,
            Err(err) if matches!(err.kind(), csv::ErrorKind::Deserialize { .. }) => continue,
            Err(err) => return Err(err.into()),
        };
        let (Some(lat), Some(lng)) = (row.lat, row.lng) else {
            continue;
        };
        let index = points.len();
        points.push(Waypoint {
            lat,
            lng,
            timestamp: row
                .timestamp
                .unwrap_or(index as f64 * DEFAULT_SECONDS_PER_POINT),
        });
    }

    if points.is_empty() {
        return Err(ImportError::NoWaypoints);
    }
    Ok(Track::new(points)?)
}

/// One manual-entry form row, exactly as typed.
#[derive(Debug, Clone, Default)]
pub struct ManualPoint {
    pub lat: String,
    pub lng: String,
    pub timestamp: Option<f64>,
}

/// Normalize manual-entry rows into a validated track.
///
/// Blank or unparseable coordinates are dropped silently; missing
/// timestamps default to [`DEFAULT_SECONDS_PER_POINT`] seconds per accepted
/// point.
pub fn track_from_manual_points(points: &[ManualPoint]) -> Result<Track, ImportError> {
    let mut waypoints = Vec::new();
    for point in points {
        let (Ok(lat), Ok(lng)) = (
            point.lat.trim().parse::<f64>(),
            point.lng.trim().parse::<f64>(),
        ) else {
            continue;
        };
        let index = waypoints.len();
        waypoints.push(Waypoint {
            lat,
            lng,
            timestamp: point
                .timestamp
                .unwrap_or(index as f64 * DEFAULT_SECONDS_PER_POINT),
        });
    }

    if waypoints.is_empty() {
        return Err(ImportError::NoWaypoints);
    }
    Ok(Track::new(waypoints)?)
}
