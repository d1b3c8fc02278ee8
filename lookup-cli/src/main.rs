use std::fs::File;
use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use geobox::Coordinate;
use sightings::{AtlasClient, AtlasConfig, run_query};
use tracing::info;

/// Queries the occurrence service for species sightings around a point and
/// writes the result as CSV.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Center longitude in decimal degrees
    #[arg(long, default_value_t = 152.93173217773438, allow_hyphen_values = true)]
    longitude: f64,

    /// Center latitude in decimal degrees
    #[arg(long, default_value_t = -27.10943603515625, allow_hyphen_values = true)]
    latitude: f64,

    /// Radius around the center in meters
    #[arg(long, default_value_t = 500.0)]
    radius: f64,

    /// Earliest sighting year to include
    #[arg(long, default_value_t = 2010)]
    year_start: i32,

    /// Latest sighting year to include
    #[arg(long, default_value_t = 2024)]
    year_end: i32,

    /// File the CSV result is written to
    #[arg(short, long, default_value = "occurrences.csv")]
    output: PathBuf,

    /// Skip echoing the result table to stdout
    #[arg(long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let center = Coordinate::new(args.longitude, args.latitude)?;
    let client = AtlasClient::new(AtlasConfig::from_env())?;
    let table = run_query(&client, center, args.radius, args.year_start, args.year_end)?;

    if !args.quiet {
        table.write_csv(io::stdout().lock())?;
    }

    let file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    table.write_csv(file)?;
    info!(rows = table.len(), output = %args.output.display(), "wrote query result");

    Ok(())
}
