//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads configuration from the environment
//! - runs the quote / batch / tracking pipelines
//! - prints reports and writes optional exports

use chrono::{Local, NaiveDateTime};
use clap::Parser;
use log::{debug, info};

use crate::cli::{BatchArgs, Command, QuoteArgs, TrackArgs, WeatherArgs};
use crate::config::EtaConfig;
use crate::domain::parse_departure;
use crate::error::AppError;
use crate::eta::EtaPredictor;

pub mod pipeline;

/// Entry point for the `eta` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();
    let config = EtaConfig::from_env()?;
    debug!("loaded config: {config:?}");

    match cli.command {
        Command::Quote(args) => handle_quote(args, config),
        Command::Batch(args) => handle_batch(args, config),
        Command::Track(args) => handle_track(args, config),
    }
}

fn handle_quote(args: QuoteArgs, config: EtaConfig) -> Result<(), AppError> {
    let config = apply_weather_args(config, &args.weather);
    let departure = departure_or_now(args.lane.depart.as_deref())?;

    let quote = pipeline::run_quote(
        args.lane.origin,
        args.lane.destination,
        args.lane.carrier,
        departure,
        &config,
    )?;

    let doc = quote.to_document();
    if args.json {
        println!("{}", crate::io::json::quote_to_json(&doc)?);
    } else {
        println!(
            "{}",
            crate::report::format_quote(&quote.route, &quote.prediction)
        );
    }

    if let Some(path) = &args.export {
        crate::io::json::write_quote_json(path, &doc)?;
        info!("wrote quote to {}", path.display());
    }

    Ok(())
}

fn handle_batch(args: BatchArgs, config: EtaConfig) -> Result<(), AppError> {
    let config = apply_weather_args(config, &args.weather);
    let ingested = crate::io::ingest::load_lanes(&args.lanes)?;
    info!(
        "read {} row(s), {} usable",
        ingested.rows_read,
        ingested.lanes.len()
    );

    // Batches are always reproducible: without an explicit seed we use 0.
    let seed = config.seed.unwrap_or(0);
    let predictor = EtaPredictor::new(config);
    let output = crate::batch::run_batch(&ingested.lanes, &predictor, seed);
    let summary = crate::report::summarize(&output.quotes, args.top);

    println!(
        "{}",
        crate::report::format_batch(&output, &summary, &ingested.row_errors)
    );

    if let Some(path) = &args.export {
        crate::io::export::write_quotes_csv_file(path, &output.quotes)?;
        info!("wrote {} quote(s) to {}", output.quotes.len(), path.display());
    }

    Ok(())
}

fn handle_track(args: TrackArgs, config: EtaConfig) -> Result<(), AppError> {
    let config = apply_weather_args(config, &args.weather);
    let departure = departure_or_now(args.lane.depart.as_deref())?;
    let at = departure_or_now(args.at.as_deref())?;

    let quote = pipeline::run_quote(
        args.lane.origin,
        args.lane.destination,
        args.lane.carrier,
        departure,
        &config,
    )?;
    let snapshot =
        crate::tracking::track(quote.origin, quote.destination, &quote.prediction, at)?;

    println!(
        "{}",
        crate::report::format_quote(&quote.route, &quote.prediction)
    );
    println!("{}", crate::report::format_tracking(&snapshot));
    Ok(())
}

/// CLI flags win over environment configuration.
fn apply_weather_args(mut config: EtaConfig, args: &WeatherArgs) -> EtaConfig {
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.no_weather {
        config.simulate_weather = false;
    }
    config
}

/// Parse an optional local timestamp, defaulting to the wall clock.
fn departure_or_now(raw: Option<&str>) -> Result<NaiveDateTime, AppError> {
    match raw {
        Some(raw) => Ok(parse_departure(raw)?),
        None => Ok(Local::now().naive_local()),
    }
}
