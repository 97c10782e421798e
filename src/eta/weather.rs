//! Weather inputs for the predictor.
//!
//! The predictor never reaches for weather itself; it is handed a list of
//! conditions. `WeatherSource` is the seam where a live forecast feed plugs in.
//! Until then `SimulatedWeather` generates plausible seasonal conditions from a
//! seedable RNG so runs are reproducible.

use chrono::{Datelike, NaiveDateTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::{EtaRequest, Severity, WeatherCondition, WeatherKind};
use crate::error::EtaError;

/// Routes touching latitudes above this are exposed to winter snow.
pub const SNOW_BELT_LATITUDE: f64 = 40.0;

const SNOW_MODERATE_PROB: f64 = 0.6;
const RAIN_PROB: f64 = 0.3;
const RAIN_MODERATE_PROB: f64 = 0.5;
const WIND_PROB: f64 = 0.15;

/// Provider of route weather conditions.
pub trait WeatherSource {
    /// Short label for logs.
    fn name(&self) -> &str;

    fn conditions(&mut self, request: &EtaRequest) -> Result<Vec<WeatherCondition>, EtaError>;
}

/// Winter months by zero-based index: November through March.
pub fn is_winter(departure: NaiveDateTime) -> bool {
    let month0 = departure.month0();
    month0 >= 10 || month0 <= 2
}

/// Draw a set of weather conditions for a route.
///
/// - winter + either endpoint above the snow belt: snow (60% moderate, 40% light)
/// - independently, 30% chance of rain (even split moderate/light)
/// - independently, 15% chance of moderate wind
///
/// Zero, one, or several conditions may come back.
pub fn generate_weather<R: Rng + ?Sized>(
    rng: &mut R,
    departure: NaiveDateTime,
    origin_lat: f64,
    dest_lat: f64,
) -> Vec<WeatherCondition> {
    let mut conditions = Vec::new();

    if is_winter(departure) && (origin_lat > SNOW_BELT_LATITUDE || dest_lat > SNOW_BELT_LATITUDE) {
        let severity = if rng.gen_bool(SNOW_MODERATE_PROB) {
            Severity::Moderate
        } else {
            Severity::Light
        };
        conditions.push(WeatherCondition::new(
            WeatherKind::Snow,
            severity,
            "northern route segments",
        ));
    }

    if rng.gen_bool(RAIN_PROB) {
        let severity = if rng.gen_bool(RAIN_MODERATE_PROB) {
            Severity::Moderate
        } else {
            Severity::Light
        };
        conditions.push(WeatherCondition::new(WeatherKind::Rain, severity, "the route corridor"));
    }

    if rng.gen_bool(WIND_PROB) {
        conditions.push(WeatherCondition::new(
            WeatherKind::Wind,
            Severity::Moderate,
            "open highway stretches",
        ));
    }

    conditions
}

/// Seasonal weather simulation backed by `StdRng`.
#[derive(Debug, Clone)]
pub struct SimulatedWeather {
    rng: StdRng,
}

impl SimulatedWeather {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded when `seed` is given, otherwise OS entropy.
    pub fn from_seed_opt(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl WeatherSource for SimulatedWeather {
    fn name(&self) -> &str {
        "simulated"
    }

    fn conditions(&mut self, request: &EtaRequest) -> Result<Vec<WeatherCondition>, EtaError> {
        Ok(generate_weather(
            &mut self.rng,
            request.departure,
            request.origin_lat,
            request.dest_lat,
        ))
    }
}

/// A fixed list of conditions (use `FixedWeather::none()` for clear skies).
#[derive(Debug, Clone, Default)]
pub struct FixedWeather {
    conditions: Vec<WeatherCondition>,
}

impl FixedWeather {
    pub fn new(conditions: Vec<WeatherCondition>) -> Self {
        Self { conditions }
    }

    pub fn none() -> Self {
        Self::default()
    }
}

impl WeatherSource for FixedWeather {
    fn name(&self) -> &str {
        "fixed"
    }

    fn conditions(&mut self, _request: &EtaRequest) -> Result<Vec<WeatherCondition>, EtaError> {
        Ok(self.conditions.clone())
    }
}
