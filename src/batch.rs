//! Parallel quoting over many lanes.
//!
//! Each lane draws weather from its own RNG seeded by `(seed, lane id)`, so a
//! batch gives the same answers regardless of thread scheduling or row order.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use log::info;
use rayon::prelude::*;

use crate::domain::{EtaPrediction, EtaRequest, RouteEstimate};
use crate::error::EtaError;
use crate::eta::{EtaPredictor, FixedWeather, SimulatedWeather, WeatherSource};
use crate::geo::route_estimate;
use crate::io::ingest::Lane;

/// A quoted lane.
#[derive(Debug, Clone, PartialEq)]
pub struct LaneQuote {
    pub lane: Lane,
    pub route: RouteEstimate,
    pub prediction: EtaPrediction,
}

#[derive(Debug, Clone)]
pub struct LaneFailure {
    pub id: String,
    pub error: EtaError,
}

#[derive(Debug, Clone, Default)]
pub struct BatchOutput {
    /// Successful quotes in input order.
    pub quotes: Vec<LaneQuote>,
    pub failures: Vec<LaneFailure>,
}

/// Seed for a single lane's weather draw.
///
/// `DefaultHasher` output is stable within one build but may change across
/// Rust releases, so batch results repeat only under the same toolchain.
pub fn lane_seed(seed: u64, lane_id: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    lane_id.hash(&mut hasher);
    hasher.finish()
}

/// Quote one lane: distance -> base duration -> ETA.
pub fn quote_lane(
    lane: &Lane,
    predictor: &EtaPredictor,
    weather: &mut dyn WeatherSource,
) -> Result<LaneQuote, EtaError> {
    let route = route_estimate(lane.origin, lane.destination)?;
    let request = EtaRequest {
        base_duration_hours: route.base_duration_hours,
        carrier_mode: lane.carrier_mode,
        origin_lat: lane.origin.lat,
        dest_lat: lane.destination.lat,
        departure: lane.departure,
    };
    let prediction = predictor.predict(&request, weather, &mut FixedWeather::none())?;
    Ok(LaneQuote {
        lane: lane.clone(),
        route,
        prediction,
    })
}

/// Quote all lanes in parallel.
pub fn run_batch(lanes: &[Lane], predictor: &EtaPredictor, seed: u64) -> BatchOutput {
    let simulate = predictor.config().simulate_weather;

    let results: Vec<Result<LaneQuote, LaneFailure>> = lanes
        .par_iter()
        .map(|lane| {
            let outcome = if simulate {
                quote_lane(lane, predictor, &mut SimulatedWeather::seeded(lane_seed(seed, &lane.id)))
            } else {
                quote_lane(lane, predictor, &mut FixedWeather::none())
            };
            outcome.map_err(|error| LaneFailure {
                id: lane.id.clone(),
                error,
            })
        })
        .collect();

    let mut out = BatchOutput::default();
    for result in results {
        match result {
            Ok(quote) => out.quotes.push(quote),
            Err(failure) => out.failures.push(failure),
        }
    }

    info!(
        "quoted {} lane(s), {} failure(s)",
        out.quotes.len(),
        out.failures.len()
    );
    out
}
