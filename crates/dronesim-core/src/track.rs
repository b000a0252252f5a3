//! Validated waypoint track: the single source of truth for the path.

use serde::Serialize;
use thiserror::Error;

use crate::models::Waypoint;

#[derive(Debug, Error)]
pub enum TrackError {
    /// The interpolator's adjacent-pair scan requires timestamps to be
    /// non-decreasing in list order.
    #[error("waypoint {index} breaks timestamp order ({current} after {previous})")]
    UnsortedTimestamps {
        index: usize,
        previous: f64,
        current: f64,
    },
}

/// Ordered, timestamp-validated waypoint sequence. Replaced wholesale by
/// waypoint producers; never mutated in place.
#[derive(Debug, Clone, Default)]
pub struct Track {
    points: Vec<Waypoint>,
}

impl Track {
    /// Admit a waypoint sequence, rejecting out-of-order timestamps.
    pub fn new(points: Vec<Waypoint>) -> Result<Self, TrackError> {
        for (index, pair) in points.windows(2).enumerate() {
            if pair[1].timestamp < pair[0].timestamp {
                return Err(TrackError::UnsortedTimestamps {
                    index: index + 1,
                    previous: pair[0].timestamp,
                    current: pair[1].timestamp,
                });
            }
        }
        Ok(Self { points })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[Waypoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&Waypoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Waypoint> {
        self.points.last()
    }

    /// Total path duration in seconds: the last waypoint's timestamp
    /// (simulation time starts at zero), or 0 for an empty track.
    pub fn total_duration(&self) -> f64 {
        self.last().map(|wp| wp.timestamp).unwrap_or(0.0)
    }

    /// All waypoints at or before `sim_time`, in track order. Sorted
    /// timestamps make the visited set a prefix of the track.
    pub fn visited_at(&self, sim_time: f64) -> &[Waypoint] {
        let count = self.points.partition_point(|wp| wp.timestamp <= sim_time);
        &self.points[..count]
    }

    /// Bounding box over all waypoints, for fitting a map viewport.
    pub fn bounds(&self) -> Option<Bounds> {
        let first = self.points.first()?;
        let mut bounds = Bounds {
            south: first.lat,
            west: first.lng,
            north: first.lat,
            east: first.lng,
        };
        for wp in &self.points[1..] {
            bounds.south = bounds.south.min(wp.lat);
            bounds.west = bounds.west.min(wp.lng);
            bounds.north = bounds.north.max(wp.lat);
            bounds.east = bounds.east.max(wp.lng);
        }
        Some(bounds)
    }
}

/// Geographic bounding box (south/west/north/east extremes in degrees).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}
