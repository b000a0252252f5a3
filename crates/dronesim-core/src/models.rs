//! Core data models for the drone motion simulator.

use serde::{Deserialize, Serialize};

/// A timed geographic point along a flight track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub lat: f64,
    #[serde(alias = "lon")]
    pub lng: f64,
    /// Seconds since the start of the track.
    #[serde(default, alias = "time")]
    pub timestamp: f64,
}

impl Waypoint {
    pub fn new(lat: f64, lng: f64, timestamp: f64) -> Self {
        Self {
            lat,
            lng,
            timestamp,
        }
    }

    /// Whether two points share exactly the same coordinates.
    pub fn coincides_with(&self, other: &Waypoint) -> bool {
        self.lat == other.lat && self.lng == other.lng
    }
}

/// A point the vehicle occupies at some simulation time: an actual waypoint
/// or an interpolated point between two waypoints. The `timestamp` always
/// equals the simulation time the position represents.
pub type Position = Waypoint;

/// A named location supplied by the geocoding collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedLocation {
    pub lat: f64,
    #[serde(alias = "lon")]
    pub lng: f64,
    pub name: String,
}

impl NamedLocation {
    /// Turn the location into a seed waypoint for a new track.
    pub fn to_waypoint(&self, timestamp: f64) -> Waypoint {
        Waypoint::new(self.lat, self.lng, timestamp)
    }
}
