//! Look up a location by name and print it as a seed waypoint.

use anyhow::Result;
use clap::Parser;
use dronesim_cli::geocode::GeocodeClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Search for a location by name (forward geocoding)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Free-form location query
    query: String,

    /// Timestamp for the printed seed waypoint
    #[arg(long, default_value_t = 0.0)]
    timestamp: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("dronesim_cli=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let client = GeocodeClient::from_env()?;

    match client.search(&args.query)? {
        Some(location) => {
            let seed = location.to_waypoint(args.timestamp);
            println!("{}", location.name);
            println!("  lat: {:.6}", location.lat);
            println!("  lng: {:.6}", location.lng);
            println!("  csv: {},{},{}", seed.lat, seed.lng, seed.timestamp);
        }
        None => println!("No results for {:?}", args.query),
    }
    Ok(())
}
