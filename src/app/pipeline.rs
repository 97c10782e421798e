//! Shared "quote pipeline" used by the `quote` and `track` commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! coordinates -> distance -> base duration -> weather -> prediction

use chrono::NaiveDateTime;

use crate::config::EtaConfig;
use crate::domain::{CarrierMode, Coordinate, EtaPrediction, EtaRequest, RouteEstimate};
use crate::error::AppError;
use crate::eta::{EtaPredictor, FixedWeather, SimulatedWeather};
use crate::geo::route_estimate;
use crate::io::json::QuoteDocument;

/// All computed outputs of a single quote.
#[derive(Debug, Clone)]
pub struct QuoteOutput {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub route: RouteEstimate,
    pub request: EtaRequest,
    pub prediction: EtaPrediction,
}

impl QuoteOutput {
    pub fn to_document(&self) -> QuoteDocument {
        QuoteDocument::new(
            self.origin,
            self.destination,
            self.route,
            self.request.clone(),
            self.prediction.clone(),
        )
    }
}

/// Run one quote end to end.
pub fn run_quote(
    origin: Coordinate,
    destination: Coordinate,
    carrier_mode: CarrierMode,
    departure: NaiveDateTime,
    config: &EtaConfig,
) -> Result<QuoteOutput, AppError> {
    let route = route_estimate(origin, destination)?;
    let request = EtaRequest {
        base_duration_hours: route.base_duration_hours,
        carrier_mode,
        origin_lat: origin.lat,
        dest_lat: destination.lat,
        departure,
    };

    let predictor = EtaPredictor::new(config.clone());
    let prediction = if config.simulate_weather {
        predictor.predict(
            &request,
            &mut SimulatedWeather::from_seed_opt(config.seed),
            &mut FixedWeather::none(),
        )?
    } else {
        predictor.calculate(&request, &[])?
    };

    Ok(QuoteOutput {
        origin,
        destination,
        route,
        request,
        prediction,
    })
}
