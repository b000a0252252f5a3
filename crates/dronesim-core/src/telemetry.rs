//! Telemetry derivations: pure functions of the playback state.
//!
//! Altitude and battery are cosmetic functions of progress, not physics.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Position, Waypoint};
use crate::playback::Simulation;
use crate::spatial::{bearing, haversine_distance};
use crate::track::Track;

/// Peak simulated cruise altitude, in meters.
const MAX_ALTITUDE_M: f64 = 120.0;

/// Ground speed in m/s from the most recently visited waypoint to the
/// current position.
///
/// Needs the current position plus at least one prior visited waypoint;
/// coincident points or a non-positive time delta read as 0.
pub fn ground_speed_mps(current: &Position, visited: &[Waypoint]) -> f64 {
    let Some(prev) = visited.last() else {
        return 0.0;
    };
    if current.coincides_with(prev) {
        return 0.0;
    }
    let dt = current.timestamp - prev.timestamp;
    if dt <= 0.0 {
        return 0.0;
    }
    haversine_distance(prev.lat, prev.lng, current.lat, current.lng) / dt
}

/// Heading in degrees (0 = north, clockwise) from the most recently visited
/// waypoint toward the current position; 0 when undefined.
pub fn heading_deg(current: &Position, visited: &[Waypoint]) -> f64 {
    let Some(prev) = visited.last() else {
        return 0.0;
    };
    if current.coincides_with(prev) {
        return 0.0;
    }
    let degrees = bearing(prev.lat, prev.lng, current.lat, current.lng).to_degrees();
    (degrees + 360.0) % 360.0
}

/// Total distance flown, in meters: haversine sums over consecutive pairs of
/// (visited waypoints + current position), skipping coincident pairs.
pub fn distance_traveled_m(visited: &[Waypoint], current: &Position) -> f64 {
    if visited.is_empty() {
        return 0.0;
    }
    let mut total = 0.0;
    let mut prev = &visited[0];
    for point in visited[1..].iter().chain(std::iter::once(current)) {
        if !point.coincides_with(prev) {
            total += haversine_distance(prev.lat, prev.lng, point.lat, point.lng);
        }
        prev = point;
    }
    total
}

/// Estimated time of arrival readout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eta {
    Arrived,
    Remaining { minutes: u64, seconds: u64 },
}

impl fmt::Display for Eta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Eta::Arrived => write!(f, "Arrived"),
            Eta::Remaining { minutes, seconds } => write!(f, "{minutes}m {seconds}s"),
        }
    }
}

/// Remaining flight time at the current position, as whole minutes and
/// seconds.
pub fn eta(track: &Track, current: &Position, progress: f64) -> Eta {
    if progress >= 100.0 {
        return Eta::Arrived;
    }
    let remaining = track.total_duration() - current.timestamp;
    let minutes = (remaining / 60.0).floor();
    let seconds = (remaining - minutes * 60.0).floor();
    Eta::Remaining {
        minutes: minutes as u64,
        seconds: seconds as u64,
    }
}

/// Simulated altitude: linear takeoff ramp below 10% progress, linear
/// landing ramp above 90%, cruise with a small sinusoidal variation between.
pub fn simulated_altitude_m(progress: f64) -> f64 {
    if progress < 10.0 {
        progress / 10.0 * MAX_ALTITUDE_M
    } else if progress > 90.0 {
        (100.0 - progress) / 10.0 * MAX_ALTITUDE_M
    } else {
        MAX_ALTITUDE_M + 10.0 * (progress * 0.2).sin()
    }
}

/// Simulated battery charge: linear drain landing near 20% at completion.
pub fn battery_pct(progress: f64) -> f64 {
    100.0 - progress * 0.8
}

/// Aggregated telemetry readout for one playback tick.
#[derive(Debug, Clone, Serialize)]
pub struct TelemetrySnapshot {
    pub lat: f64,
    pub lng: f64,
    pub progress_pct: f64,
    pub speed_mps: f64,
    pub heading_deg: f64,
    pub distance_m: f64,
    pub altitude_m: f64,
    pub battery_pct: f64,
    pub eta: String,
    pub captured_at: DateTime<Utc>,
}

impl TelemetrySnapshot {
    /// Capture the readout for the simulation's current position, or `None`
    /// before any position exists.
    pub fn capture(sim: &Simulation) -> Option<Self> {
        let current = sim.current_position()?;
        let visited = sim.visited();
        let progress = sim.progress();
        Some(Self {
            lat: current.lat,
            lng: current.lng,
            progress_pct: progress,
            speed_mps: ground_speed_mps(current, visited),
            heading_deg: heading_deg(current, visited),
            distance_m: distance_traveled_m(visited, current),
            altitude_m: simulated_altitude_m(progress),
            battery_pct: battery_pct(progress),
            eta: eta(sim.track(), current, progress).to_string(),
            captured_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wp(lat: f64, lng: f64, timestamp: f64) -> Waypoint {
        Waypoint::new(lat, lng, timestamp)
    }

    #[test]
    fn speed_needs_a_prior_visited_waypoint() {
        let current = wp(0.0, 5.0, 5.0);
        assert_eq!(ground_speed_mps(&current, &[]), 0.0);
    }

    #[test]
    fn speed_is_distance_over_time_delta() {
        let visited = [wp(0.0, 0.0, 0.0)];
        let current = wp(0.0, 5.0, 5.0);
        let expected = haversine_distance(0.0, 0.0, 0.0, 5.0) / 5.0;
        assert!((ground_speed_mps(&current, &visited) - expected).abs() < 1e-9);
    }

    #[test]
    fn speed_is_zero_for_coincident_points_or_bad_delta() {
        let visited = [wp(1.0, 1.0, 5.0)];
        assert_eq!(ground_speed_mps(&wp(1.0, 1.0, 10.0), &visited), 0.0);
        assert_eq!(ground_speed_mps(&wp(2.0, 2.0, 5.0), &visited), 0.0);
        assert_eq!(ground_speed_mps(&wp(2.0, 2.0, 4.0), &visited), 0.0);
    }

    #[test]
    fn heading_points_from_previous_waypoint_to_position() {
        let visited = [wp(0.0, 0.0, 0.0)];
        let east = heading_deg(&wp(0.0, 1.0, 5.0), &visited);
        assert!((east - 90.0).abs() < 1e-6);
        let north = heading_deg(&wp(1.0, 0.0, 5.0), &visited);
        assert!(north.abs() < 1e-6);
        assert_eq!(heading_deg(&wp(0.0, 1.0, 5.0), &[]), 0.0);
    }

    #[test]
    fn distance_sums_consecutive_legs() {
        let visited = [wp(0.0, 0.0, 0.0), wp(0.0, 1.0, 5.0)];
        let current = wp(0.0, 2.0, 10.0);
        let expected = haversine_distance(0.0, 0.0, 0.0, 1.0) + haversine_distance(0.0, 1.0, 0.0, 2.0);
        assert!((distance_traveled_m(&visited, &current) - expected).abs() < 1e-6);
    }

    #[test]
    fn distance_skips_coincident_pairs() {
        let visited = [wp(0.0, 0.0, 0.0), wp(0.0, 0.0, 5.0)];
        let current = wp(0.0, 1.0, 10.0);
        let expected = haversine_distance(0.0, 0.0, 0.0, 1.0);
        assert!((distance_traveled_m(&visited, &current) - expected).abs() < 1e-6);
    }

    #[test]
    fn distance_is_zero_with_no_visited_waypoints() {
        assert_eq!(distance_traveled_m(&[], &wp(0.0, 1.0, 5.0)), 0.0);
    }

    #[test]
    fn eta_formats_whole_minutes_and_seconds() {
        let track = Track::new(vec![wp(0.0, 0.0, 0.0), wp(0.0, 1.0, 100.0)]).unwrap();
        let current = wp(0.0, 0.4, 40.0);
        let remaining = eta(&track, &current, 40.0);
        assert_eq!(
            remaining,
            Eta::Remaining {
                minutes: 1,
                seconds: 0
            }
        );
        assert_eq!(remaining.to_string(), "1m 0s");

        let current = wp(0.0, 0.995, 99.5);
        assert_eq!(eta(&track, &current, 99.5).to_string(), "0m 0s");
    }

    #[test]
    fn eta_reports_arrival_at_full_progress() {
        let track = Track::new(vec![wp(0.0, 0.0, 0.0), wp(0.0, 1.0, 100.0)]).unwrap();
        let current = wp(0.0, 1.0, 100.0);
        assert_eq!(eta(&track, &current, 100.0), Eta::Arrived);
        assert_eq!(Eta::Arrived.to_string(), "Arrived");
    }

    #[test]
    fn altitude_ramps_cruises_and_descends() {
        assert!((simulated_altitude_m(0.0) - 0.0).abs() < 1e-9);
        assert!((simulated_altitude_m(5.0) - 60.0).abs() < 1e-9);
        let cruise = simulated_altitude_m(50.0);
        assert!((cruise - (120.0 + 10.0 * (10.0_f64).sin())).abs() < 1e-9);
        assert!((simulated_altitude_m(95.0) - 60.0).abs() < 1e-9);
        assert!((simulated_altitude_m(100.0) - 0.0).abs() < 1e-9);
    }

    #[test]
    fn battery_drains_linearly_to_twenty_percent() {
        assert_eq!(battery_pct(0.0), 100.0);
        assert_eq!(battery_pct(50.0), 60.0);
        assert_eq!(battery_pct(100.0), 20.0);
    }

    #[test]
    fn snapshot_matches_seeked_simulation() {
        // End-to-end: a due-east 10s track seeked to 50%.
        let track = Track::new(vec![wp(0.0, 0.0, 0.0), wp(0.0, 10.0, 10.0)]).unwrap();
        let mut sim = Simulation::new(track);
        sim.seek(50.0);

        let snapshot = TelemetrySnapshot::capture(&sim).unwrap();
        assert_eq!(snapshot.lat, 0.0);
        assert!((snapshot.lng - 5.0).abs() < 1e-9);
        assert_eq!(snapshot.progress_pct, 50.0);

        let expected_speed = haversine_distance(0.0, 0.0, 0.0, 5.0) / 5.0;
        assert!((snapshot.speed_mps - expected_speed).abs() < 1e-6);
        assert!((snapshot.heading_deg - 90.0).abs() < 1e-6);
        assert!((snapshot.distance_m - haversine_distance(0.0, 0.0, 0.0, 5.0)).abs() < 1e-6);
        assert_eq!(snapshot.eta, "0m 5s");
        assert_eq!(snapshot.battery_pct, 60.0);
    }

    #[test]
    fn snapshot_is_absent_without_a_position() {
        let sim = Simulation::new(Track::empty());
        assert!(TelemetrySnapshot::capture(&sim).is_none());
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let track = Track::new(vec![wp(0.0, 0.0, 0.0), wp(0.0, 10.0, 10.0)]).unwrap();
        let mut sim = Simulation::new(track);
        sim.seek(25.0);
        let snapshot = TelemetrySnapshot::capture(&sim).unwrap();
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["progress_pct"], 25.0);
        assert!(json["eta"].is_string());
    }
}
