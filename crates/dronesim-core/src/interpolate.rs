//! Pure time-to-position interpolation over a track.

use crate::models::Position;
use crate::track::Track;

/// Position on `track` at simulation time `sim_time`.
///
/// Clamps to the first waypoint for `sim_time <= 0` and to the last waypoint
/// for `sim_time >= total_duration`, returning them verbatim. In between,
/// linearly interpolates latitude and longitude within the bounding segment
/// and stamps the result with exactly `sim_time`. A zero-duration bounding
/// segment yields its leading waypoint unchanged. Returns `None` for an
/// empty track.
pub fn position_at_time(track: &Track, sim_time: f64) -> Option<Position> {
    let points = track.points();
    let first = points.first()?;
    if sim_time <= 0.0 {
        return Some(*first);
    }
    let last = points.last()?;
    if sim_time >= track.total_duration() {
        return Some(*last);
    }

    for pair in points.windows(2) {
        let (before, after) = (&pair[0], &pair[1]);
        if before.timestamp <= sim_time && sim_time <= after.timestamp {
            let segment_duration = after.timestamp - before.timestamp;
            if segment_duration == 0.0 {
                return Some(*before);
            }
            let factor = (sim_time - before.timestamp) / segment_duration;
            return Some(Position {
                lat: before.lat + (after.lat - before.lat) * factor,
                lng: before.lng + (after.lng - before.lng) * factor,
                timestamp: sim_time,
            });
        }
    }

    // No bracketing segment: the track starts later than `sim_time`.
    Some(*first)
}
