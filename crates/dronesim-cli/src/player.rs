//! Real-time playback driver.
//!
//! Feeds measured wall-clock deltas into the simulation clock at a fixed
//! tick rate, decoupling simulated motion from scheduling jitter. One tick
//! is in flight at a time; shutdown pauses the clock before another tick can
//! be scheduled.

use std::time::Duration;

use dronesim_core::telemetry::distance_traveled_m;
use dronesim_core::{Simulation, TelemetrySnapshot};
use tokio::sync::broadcast;
use tokio::time::{interval, Instant};

/// Outcome of one playback run.
#[derive(Debug, Clone)]
pub struct PlaybackSummary {
    pub ticks: u64,
    pub final_progress: f64,
    pub distance_m: f64,
    pub wall_elapsed: Duration,
}

/// Drive the simulation in real time until it stops playing or `shutdown`
/// fires.
///
/// The first tick after start supplies a zero delta so a stale instant
/// cannot cause a position jump. `on_tick` receives the simulation and a
/// fresh telemetry snapshot after every applied tick.
pub async fn run_playback(
    sim: &mut Simulation,
    rate_hz: f64,
    mut shutdown: broadcast::Receiver<()>,
    mut on_tick: impl FnMut(&Simulation, &TelemetrySnapshot),
) -> PlaybackSummary {
    let started = Instant::now();
    let mut ticker = interval(Duration::from_secs_f64(1.0 / rate_hz.max(0.001)));
    let mut last_tick: Option<Instant> = None;
    let mut ticks = 0u64;

    sim.start();
    if !sim.is_playing() {
        tracing::warn!(phase = ?sim.phase(), "nothing to play");
        return summarize(sim, ticks, started);
    }
    tracing::info!(
        waypoints = sim.track().len(),
        duration_s = sim.track().total_duration(),
        "playback started"
    );

    loop {
        tokio::select! {
            _ = shutdown.recv() => {
                sim.pause();
                tracing::info!(progress = sim.progress(), "playback cancelled");
                break;
            }
            now = ticker.tick() => {
                let elapsed = last_tick
                    .map(|previous| (now - previous).as_secs_f64())
                    .unwrap_or(0.0);
                last_tick = Some(now);

                if sim.tick(elapsed).is_none() {
                    break;
                }
                ticks += 1;
                if let Some(snapshot) = TelemetrySnapshot::capture(sim) {
                    on_tick(sim, &snapshot);
                }
                if !sim.is_playing() {
                    tracing::info!(ticks, "playback complete");
                    break;
                }
            }
        }
    }

    summarize(sim, ticks, started)
}

fn summarize(sim: &Simulation, ticks: u64, started: Instant) -> PlaybackSummary {
    let distance_m = sim
        .current_position()
        .map(|position| distance_traveled_m(sim.visited(), position))
        .unwrap_or(0.0);
    PlaybackSummary {
        ticks,
        final_progress: sim.progress(),
        distance_m,
        wall_elapsed: started.elapsed(),
    }
}
