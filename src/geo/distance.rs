//! Great-circle distance and naive transit duration.
//!
//! - `calculate_distance` uses the haversine formula on a spherical Earth.
//! - `estimate_base_duration` assumes a constant average freight speed plus
//!   mandatory driver rest stops on long hauls.

use crate::domain::{Coordinate, RouteEstimate};
use crate::error::{EtaError, ensure_finite};

/// Mean Earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Average over-the-road freight speed (mph).
pub const AVERAGE_SPEED_MPH: f64 = 50.0;

/// One rest stop per full interval of this many miles.
pub const REST_STOP_INTERVAL_MILES: f64 = 500.0;

/// Hours spent per rest stop.
pub const REST_STOP_HOURS: f64 = 0.75;

/// Haversine distance in miles, rounded to the nearest whole mile.
///
/// Coordinate ranges are not checked; out-of-range values give a defined but
/// meaningless distance. Non-finite values are rejected so NaN never reaches
/// the predictor.
pub fn calculate_distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> Result<u32, EtaError> {
    let lat1 = ensure_finite("origin latitude", lat1)?;
    let lng1 = ensure_finite("origin longitude", lng1)?;
    let lat2 = ensure_finite("destination latitude", lat2)?;
    let lng2 = ensure_finite("destination longitude", lng2)?;

    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    // Clamp guards against a drifting slightly above 1.0 for antipodal points.
    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().atan2((1.0 - a).max(0.0).sqrt());

    Ok((EARTH_RADIUS_MILES * c).round() as u32)
}

/// Number of mandatory rest stops for a haul of `distance_miles`.
pub fn rest_stops(distance_miles: f64) -> u32 {
    if distance_miles <= 0.0 || !distance_miles.is_finite() {
        return 0;
    }
    (distance_miles / REST_STOP_INTERVAL_MILES).floor() as u32
}

/// Naive transit hours: `d / 50 + floor(d / 500) * 0.75`.
pub fn estimate_base_duration(distance_miles: f64) -> f64 {
    distance_miles / AVERAGE_SPEED_MPH + f64::from(rest_stops(distance_miles)) * REST_STOP_HOURS
}

/// Distance and base duration between two validated points.
pub fn route_estimate(origin: Coordinate, destination: Coordinate) -> Result<RouteEstimate, EtaError> {
    let distance_miles = calculate_distance(origin.lat, origin.lng, destination.lat, destination.lng)?;
    let distance = f64::from(distance_miles);
    Ok(RouteEstimate {
        distance_miles,
        base_duration_hours: estimate_base_duration(distance),
        rest_stops: rest_stops(distance),
    })
}
