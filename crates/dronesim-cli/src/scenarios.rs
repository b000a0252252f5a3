//! Built-in demo tracks for playback without a data file.

use dronesim_core::spatial::offset_by_bearing;
use dronesim_core::{Track, Waypoint};

/// A named demo track.
pub struct Scenario {
    pub name: &'static str,
    pub track: Track,
}

pub const SCENARIO_NAMES: [&str; 2] = ["delivery", "perimeter"];

/// Build the named scenario around a center coordinate.
pub fn by_name(name: &str, center_lat: f64, center_lng: f64) -> Option<Scenario> {
    match name {
        "delivery" => Some(delivery(center_lat, center_lng)),
        "perimeter" => Some(perimeter(center_lat, center_lng)),
        _ => None,
    }
}

/// Point-to-point delivery run: launch, head east, dogleg northeast, then a
/// final northern approach.
pub fn delivery(center_lat: f64, center_lng: f64) -> Scenario {
    // (distance_m from center, bearing_deg, timestamp_s)
    let hops = [
        (0.0, 0.0, 0.0),
        (350.0, 90.0, 15.0),
        (600.0, 60.0, 30.0),
        (850.0, 40.0, 50.0),
        (1000.0, 20.0, 70.0),
    ];
    Scenario {
        name: "delivery",
        track: timed_hops(center_lat, center_lng, &hops),
    }
}

/// Closed square patrol around the center, returning to the launch corner.
pub fn perimeter(center_lat: f64, center_lng: f64) -> Scenario {
    let radius_m = 400.0;
    let hops = [
        (radius_m, 45.0, 0.0),
        (radius_m, 135.0, 20.0),
        (radius_m, 225.0, 40.0),
        (radius_m, 315.0, 60.0),
        (radius_m, 45.0, 80.0),
    ];
    Scenario {
        name: "perimeter",
        track: timed_hops(center_lat, center_lng, &hops),
    }
}

fn timed_hops(center_lat: f64, center_lng: f64, hops: &[(f64, f64, f64)]) -> Track {
    let points = hops
        .iter()
        .map(|&(distance_m, bearing_deg, timestamp)| {
            let (lat, lng) =
                offset_by_bearing(center_lat, center_lng, distance_m, bearing_deg.to_radians());
            Waypoint::new(lat, lng, timestamp)
        })
        .collect();
    Track::new(points).expect("scenario hops are listed in time order")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_scenario_builds() {
        for name in SCENARIO_NAMES {
            let scenario = by_name(name, 28.7041, 77.1025).unwrap();
            assert_eq!(scenario.name, name);
            assert!(scenario.track.len() >= 2);
            assert!(scenario.track.total_duration() > 0.0);
        }
    }

    #[test]
    fn unknown_scenario_is_none() {
        assert!(by_name("orbit-the-moon", 0.0, 0.0).is_none());
    }

    #[test]
    fn perimeter_returns_to_its_launch_corner() {
        let scenario = perimeter(28.7041, 77.1025);
        let points = scenario.track.points();
        let first = points.first().unwrap();
        let last = points.last().unwrap();
        assert!(first.coincides_with(last));
        assert!(last.timestamp > first.timestamp);
    }
}
