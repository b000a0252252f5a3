//! Playback clock and simulation state container.
//!
//! All mutable simulation state lives in [`Simulation`]; the named methods
//! (`start`, `pause`, `reset`, `seek`, `set_track`, `tick`) are the only
//! mutation entry points. Everything else is a read-only projection.

use serde::Serialize;

use crate::interpolate::position_at_time;
use crate::models::{Position, Waypoint};
use crate::track::Track;

/// Fixed playback speed-up: one wall-clock second advances the simulation by
/// two seconds.
pub const SPEED_MULTIPLIER: f64 = 2.0;

/// Clock state. `Completed` is reached when progress hits 100 and is never
/// left except through `reset`, `seek`, or a track replacement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackPhase {
    #[default]
    Idle,
    Playing,
    Paused,
    Completed,
}

impl PlaybackPhase {
    pub fn is_playing(self) -> bool {
        matches!(self, PlaybackPhase::Playing)
    }
}

/// Read-only projection of the playback clock.
#[derive(Debug, Clone, Serialize)]
pub struct PlaybackState {
    pub phase: PlaybackPhase,
    pub progress: f64,
    pub current_position: Option<Position>,
}

/// Owns the track and the playback clock driving a vehicle along it.
#[derive(Debug, Clone)]
pub struct Simulation {
    track: Track,
    phase: PlaybackPhase,
    /// Percentage of total path duration elapsed, in [0, 100].
    progress: f64,
    current_position: Option<Position>,
    /// The visited set is a prefix of the (sorted) track.
    visited_len: usize,
}

impl Simulation {
    pub fn new(track: Track) -> Self {
        let mut sim = Self {
            track: Track::empty(),
            phase: PlaybackPhase::Idle,
            progress: 0.0,
            current_position: None,
            visited_len: 0,
        };
        sim.set_track(track);
        sim
    }

    /// Replace the path wholesale. Playback resets entirely: progress to
    /// zero, position to the first waypoint, visited set to empty.
    pub fn set_track(&mut self, track: Track) {
        self.track = track;
        self.reset();
    }

    /// Return to `Idle` at the start of the track, from any state.
    pub fn reset(&mut self) {
        self.phase = PlaybackPhase::Idle;
        self.progress = 0.0;
        self.current_position = self.track.first().copied();
        self.visited_len = 0;
    }

    /// Begin or resume playback. An empty track stays `Idle`; a
    /// zero-duration track is complete the moment it starts.
    pub fn start(&mut self) {
        match self.phase {
            PlaybackPhase::Idle | PlaybackPhase::Paused => {}
            PlaybackPhase::Playing | PlaybackPhase::Completed => return,
        }
        if self.track.is_empty() {
            return;
        }
        if self.track.total_duration() <= 0.0 {
            self.complete_instantly();
            return;
        }
        self.phase = PlaybackPhase::Playing;
    }

    /// Suspend playback, keeping progress and position.
    pub fn pause(&mut self) {
        if self.phase == PlaybackPhase::Playing {
            self.phase = PlaybackPhase::Paused;
        }
    }

    /// Jump to `target_progress` percent, clamped to [0, 100]. Seeking parks
    /// the clock `Paused`; it never resumes playback on its own. The visited
    /// set is recomputed from scratch since time may move backward.
    pub fn seek(&mut self, target_progress: f64) {
        if self.track.is_empty() {
            return;
        }
        self.phase = PlaybackPhase::Paused;
        self.progress = target_progress.clamp(0.0, 100.0);
        self.apply_position(self.sim_time(), true);
    }

    /// Advance the clock by `wall_elapsed_secs` of wall-clock time and
    /// return the updated position.
    ///
    /// Ticks arriving in any state but `Playing` are dropped unconditionally;
    /// that is what cancels a tick scheduled before a pause, reset, or track
    /// replacement.
    pub fn tick(&mut self, wall_elapsed_secs: f64) -> Option<Position> {
        if self.phase != PlaybackPhase::Playing {
            return None;
        }
        let total = self.track.total_duration();
        if total <= 0.0 {
            self.complete_instantly();
            return self.current_position;
        }

        let simulated_elapsed = wall_elapsed_secs * SPEED_MULTIPLIER;
        self.progress = (self.progress + simulated_elapsed / total * 100.0).min(100.0);
        self.apply_position(self.sim_time(), false);
        if self.progress >= 100.0 {
            self.phase = PlaybackPhase::Completed;
        }
        self.current_position
    }

    /// Simulation time represented by the current progress, in seconds.
    pub fn sim_time(&self) -> f64 {
        self.progress / 100.0 * self.track.total_duration()
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase.is_playing()
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn current_position(&self) -> Option<&Position> {
        self.current_position.as_ref()
    }

    /// Waypoints already passed, in track order.
    pub fn visited(&self) -> &[Waypoint] {
        &self.track.points()[..self.visited_len]
    }

    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            phase: self.phase,
            progress: self.progress,
            current_position: self.current_position,
        }
    }

    /// Traveled polyline (visited waypoints plus the current position) and
    /// the remaining tail, split at the visited-set boundary.
    pub fn path_split(&self) -> (Vec<Position>, &[Waypoint]) {
        let mut traveled: Vec<Position> = self.visited().to_vec();
        if let Some(position) = self.current_position {
            traveled.push(position);
        }
        (traveled, &self.track.points()[self.visited_len..])
    }

    fn complete_instantly(&mut self) {
        self.progress = 100.0;
        self.phase = PlaybackPhase::Completed;
        self.apply_position(self.sim_time(), true);
    }

    fn apply_position(&mut self, sim_time: f64, recompute_visited: bool) {
        if let Some(position) = position_at_time(&self.track, sim_time) {
            self.current_position = Some(position);
        }
        let visited = self.track.visited_at(sim_time).len();
        // Forward ticks only grow the prefix; seeks recompute it exactly.
        self.visited_len = if recompute_visited {
            visited
        } else {
            self.visited_len.max(visited)
        };
    }
}
