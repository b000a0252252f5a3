//! Play a waypoint track in real time and print a telemetry readout.

use std::fs::File;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use dronesim_cli::player::run_playback;
use dronesim_cli::scenarios;
use dronesim_core::{read_track_csv, Simulation, Track};
use tokio::sync::broadcast;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Play a waypoint track in real time and print drone telemetry
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// CSV file with lat,lng[,timestamp] columns
    #[arg(long, conflicts_with = "scenario")]
    csv: Option<PathBuf>,

    /// Built-in scenario name (see --list-scenarios)
    #[arg(long)]
    scenario: Option<String>,

    /// List built-in scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Scenario center latitude (default: Delhi)
    #[arg(long, default_value_t = 28.7041)]
    lat: f64,

    /// Scenario center longitude (default: Delhi)
    #[arg(long, default_value_t = 77.1025)]
    lon: f64,

    /// Tick rate in Hz
    #[arg(long, default_value_t = 10.0)]
    rate: f64,

    /// Seek to this progress percentage before starting
    #[arg(long)]
    start_at: Option<f64>,

    /// Emit one JSON object per tick instead of plain text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("dronesim_cli=info".parse()?),
        )
        .init();

    let args = Args::parse();

    if args.list_scenarios {
        for name in scenarios::SCENARIO_NAMES {
            println!("{name}");
        }
        return Ok(());
    }

    let track = load_track(&args)?;
    if let Some(bounds) = track.bounds() {
        tracing::info!(?bounds, "track bounds");
    }

    let mut sim = Simulation::new(track);
    if let Some(start_at) = args.start_at {
        sim.seek(start_at);
    }

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(());
        }
    });

    let json = args.json;
    let summary = run_playback(&mut sim, args.rate, shutdown_rx, |_, snapshot| {
        if json {
            if let Ok(line) = serde_json::to_string(snapshot) {
                println!("{line}");
            }
        } else {
            println!(
                "[{:5.1}%] pos=({:.5}, {:.5}) speed={:.1} m/s alt={:.1} m dist={:.0} m battery={:.1}% eta={}",
                snapshot.progress_pct,
                snapshot.lat,
                snapshot.lng,
                snapshot.speed_mps,
                snapshot.altitude_m,
                snapshot.distance_m,
                snapshot.battery_pct,
                snapshot.eta,
            );
        }
    })
    .await;

    println!();
    println!(
        "Playback finished at {:.1}% after {} ticks ({:.1}s wall, {:.0}m flown).",
        summary.final_progress,
        summary.ticks,
        summary.wall_elapsed.as_secs_f64(),
        summary.distance_m,
    );
    Ok(())
}

fn load_track(args: &Args) -> Result<Track> {
    if let Some(path) = &args.csv {
        let file =
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        return read_track_csv(file)
            .with_context(|| format!("failed to parse {}", path.display()));
    }
    if let Some(name) = &args.scenario {
        let Some(scenario) = scenarios::by_name(name, args.lat, args.lon) else {
            bail!("unknown scenario {name:?} (try --list-scenarios)");
        };
        return Ok(scenario.track);
    }
    bail!("provide --csv FILE or --scenario NAME");
}
