//! Command-line parsing for the freight ETA estimator.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the estimation code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{CarrierMode, Coordinate};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "eta", version, about = "Freight ETA estimator with factor breakdowns")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Estimate arrival for a single lane and explain the factors behind it.
    Quote(QuoteArgs),
    /// Quote every lane in a CSV file (in parallel).
    Batch(BatchArgs),
    /// Show where a shipment should be at a given time.
    Track(TrackArgs),
}

/// Options shared by every command that simulates weather.
#[derive(Debug, Args, Clone)]
pub struct WeatherArgs {
    /// Seed for simulated weather (overrides ETA_SEED).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Assume clear weather instead of simulating conditions.
    #[arg(long)]
    pub no_weather: bool,
}

/// A single lane.
#[derive(Debug, Args, Clone)]
pub struct LaneArgs {
    /// Origin as LAT,LNG (e.g. 34.05,-118.24).
    #[arg(long, value_parser = parse_coordinate, allow_hyphen_values = true)]
    pub origin: Coordinate,

    /// Destination as LAT,LNG.
    #[arg(long = "dest", value_parser = parse_coordinate, allow_hyphen_values = true)]
    pub destination: Coordinate,

    /// Service level.
    #[arg(short = 'c', long, value_enum, default_value_t = CarrierMode::TlDry)]
    pub carrier: CarrierMode,

    /// Local departure time (YYYY-MM-DDTHH:MM); defaults to now.
    #[arg(long)]
    pub depart: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct QuoteArgs {
    #[command(flatten)]
    pub lane: LaneArgs,

    #[command(flatten)]
    pub weather: WeatherArgs,

    /// Print the quote as JSON instead of a report.
    #[arg(long)]
    pub json: bool,

    /// Also write the quote JSON to this path.
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct BatchArgs {
    /// Lanes CSV (id, origin_lat, origin_lng, dest_lat, dest_lng, carrier, departure).
    #[arg(short = 'f', long, value_name = "CSV")]
    pub lanes: PathBuf,

    #[command(flatten)]
    pub weather: WeatherArgs,

    /// Show the N most delayed lanes in the summary.
    #[arg(long, default_value_t = 5)]
    pub top: usize,

    /// Export per-lane results to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct TrackArgs {
    #[command(flatten)]
    pub lane: LaneArgs,

    #[command(flatten)]
    pub weather: WeatherArgs,

    /// Local time to report position for (YYYY-MM-DDTHH:MM); defaults to now.
    #[arg(long)]
    pub at: Option<String>,
}

fn parse_coordinate(raw: &str) -> Result<Coordinate, String> {
    raw.parse::<Coordinate>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quote_with_negative_longitudes() {
        let cli = Cli::try_parse_from([
            "eta",
            "quote",
            "--origin",
            "34.05,-118.24",
            "--dest",
            "40.71,-74.01",
            "-c",
            "ltl",
            "--depart",
            "2025-01-07T14:00",
            "--seed",
            "3",
        ])
        .unwrap();
        let Command::Quote(args) = cli.command else {
            panic!("expected quote");
        };
        assert_eq!(args.lane.carrier, CarrierMode::Ltl);
        assert_eq!(args.lane.origin.lng, -118.24);
        assert_eq!(args.weather.seed, Some(3));
        assert!(!args.json);
    }

    #[test]
    fn rejects_unknown_carrier() {
        let err = Cli::try_parse_from([
            "eta", "quote", "--origin", "1,1", "--dest", "2,2", "-c", "air",
        ]);
        assert!(err.is_err());
    }

    #[test]
    fn batch_defaults() {
        let cli = Cli::try_parse_from(["eta", "batch", "-f", "lanes.csv"]).unwrap();
        let Command::Batch(args) = cli.command else {
            panic!("expected batch");
        };
        assert_eq!(args.top, 5);
        assert!(args.export.is_none());
        assert!(!args.weather.no_weather);
    }
}
