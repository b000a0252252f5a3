//! Playback driver integration tests.
//!
//! These run against real timers with sub-second tracks, so no external
//! services or fixtures are required.

use dronesim_cli::player::run_playback;
use dronesim_core::{PlaybackPhase, Simulation, Track, Waypoint};
use tokio::sync::broadcast;

fn wp(lat: f64, lng: f64, timestamp: f64) -> Waypoint {
    Waypoint::new(lat, lng, timestamp)
}

/// 0.4s of simulated flight: ~0.2s of wall clock at the fixed 2x speed-up.
fn short_track() -> Track {
    Track::new(vec![
        wp(0.0, 0.0, 0.0),
        wp(0.0, 0.001, 0.2),
        wp(0.001, 0.001, 0.4),
    ])
    .unwrap()
}

#[tokio::test]
async fn playback_runs_to_completion() {
    let mut sim = Simulation::new(short_track());
    let (_shutdown_tx, shutdown_rx) = broadcast::channel(1);

    let mut progress_log = Vec::new();
    let summary = run_playback(&mut sim, 50.0, shutdown_rx, |_, snapshot| {
        progress_log.push(snapshot.progress_pct);
    })
    .await;

    assert_eq!(summary.final_progress, 100.0);
    assert_eq!(sim.phase(), PlaybackPhase::Completed);
    assert!(summary.ticks >= 2);
    assert!(progress_log.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(sim.visited().len(), 3);
    assert!(summary.distance_m > 0.0);
    assert_eq!(progress_log.last().copied(), Some(100.0));
}

#[tokio::test]
async fn shutdown_pauses_playback() {
    // Long track so the run cannot complete before the shutdown lands.
    let track = Track::new(vec![wp(0.0, 0.0, 0.0), wp(0.0, 1.0, 60.0)]).unwrap();
    let mut sim = Simulation::new(track);

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    shutdown_tx.send(()).unwrap();

    let summary = run_playback(&mut sim, 50.0, shutdown_rx, |_, _| {}).await;

    assert_eq!(sim.phase(), PlaybackPhase::Paused);
    assert!(summary.final_progress < 100.0);
}

#[tokio::test]
async fn empty_track_never_starts() {
    let mut sim = Simulation::new(Track::empty());
    let (_shutdown_tx, shutdown_rx) = broadcast::channel(1);

    let summary = run_playback(&mut sim, 50.0, shutdown_rx, |_, _| {}).await;

    assert_eq!(summary.ticks, 0);
    assert_eq!(summary.final_progress, 0.0);
    assert_eq!(sim.phase(), PlaybackPhase::Idle);
}
