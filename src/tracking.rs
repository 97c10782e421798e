//! Shipment progress against a prediction.
//!
//! Position is a straight lat/lng interpolation between origin and
//! destination, which is what a map marker needs; it is not a routed path.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, EtaPrediction};
use crate::error::EtaError;
use crate::geo::calculate_distance;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackingStatus {
    Scheduled,
    InTransit,
    Delivered,
}

impl TrackingStatus {
    pub fn display_name(self) -> &'static str {
        match self {
            TrackingStatus::Scheduled => "Scheduled",
            TrackingStatus::InTransit => "In transit",
            TrackingStatus::Delivered => "Delivered",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingSnapshot {
    pub at: NaiveDateTime,
    pub status: TrackingStatus,
    /// Share of the predicted transit completed, in `[0, 1]`.
    pub progress: f64,
    pub position: Coordinate,
    pub remaining_hours: f64,
    pub miles_remaining: u32,
}

/// Where a shipment should be at time `at`, assuming it moves at a constant
/// pace from the prediction's departure to its estimated arrival.
pub fn track(
    origin: Coordinate,
    destination: Coordinate,
    prediction: &EtaPrediction,
    at: NaiveDateTime,
) -> Result<TrackingSnapshot, EtaError> {
    let elapsed_hours = (at - prediction.departure).num_milliseconds() as f64 / 3_600_000.0;
    let duration = prediction.duration_hours;

    let progress = if duration <= 0.0 {
        if elapsed_hours >= 0.0 { 1.0 } else { 0.0 }
    } else {
        (elapsed_hours / duration).clamp(0.0, 1.0)
    };

    let status = if elapsed_hours < 0.0 {
        TrackingStatus::Scheduled
    } else if progress >= 1.0 {
        TrackingStatus::Delivered
    } else {
        TrackingStatus::InTransit
    };

    let position = Coordinate {
        lat: lerp(origin.lat, destination.lat, progress),
        lng: lerp(origin.lng, destination.lng, progress),
    };

    let total_miles = calculate_distance(origin.lat, origin.lng, destination.lat, destination.lng)?;
    let miles_remaining = (f64::from(total_miles) * (1.0 - progress)).round() as u32;

    Ok(TrackingSnapshot {
        at,
        status,
        progress,
        position,
        remaining_hours: duration * (1.0 - progress),
        miles_remaining,
    })
}

fn lerp(a: f64, b: f64, u: f64) -> f64 {
    a + u * (b - a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CarrierMode, EtaRequest};
    use crate::eta::calculate_eta;
    use chrono::NaiveDate;

    fn at(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn setup() -> (Coordinate, Coordinate, EtaPrediction) {
        let origin = Coordinate::new(34.0, -118.0).unwrap();
        let dest = Coordinate::new(40.0, -74.0).unwrap();
        let request = EtaRequest {
            base_duration_hours: 10.0,
            carrier_mode: CarrierMode::TlDry,
            origin_lat: origin.lat,
            dest_lat: dest.lat,
            departure: at(7, 14),
        };
        let prediction = calculate_eta(&request, &[]).unwrap();
        (origin, dest, prediction)
    }

    #[test]
    fn before_departure_is_scheduled_at_origin() {
        let (origin, dest, p) = setup();
        let snap = track(origin, dest, &p, at(7, 10)).unwrap();
        assert_eq!(snap.status, TrackingStatus::Scheduled);
        assert_eq!(snap.progress, 0.0);
        assert_eq!(snap.position, origin);
        assert!((snap.remaining_hours - 10.0).abs() < 1e-9);
    }

    #[test]
    fn halfway_is_midpoint() {
        let (origin, dest, p) = setup();
        let snap = track(origin, dest, &p, at(7, 19)).unwrap();
        assert_eq!(snap.status, TrackingStatus::InTransit);
        assert!((snap.progress - 0.5).abs() < 1e-9);
        assert!((snap.position.lat - 37.0).abs() < 1e-9);
        assert!((snap.position.lng + 96.0).abs() < 1e-9);
        assert!(snap.miles_remaining > 0);
    }

    #[test]
    fn delivered_exactly_at_estimated_arrival() {
        let (origin, dest, p) = setup();
        let snap = track(origin, dest, &p, p.estimated_arrival).unwrap();
        assert_eq!(snap.status, TrackingStatus::Delivered);
        let just_before = p.estimated_arrival - chrono::Duration::minutes(1);
        let snap = track(origin, dest, &p, just_before).unwrap();
        assert_eq!(snap.status, TrackingStatus::InTransit);
    }

    #[test]
    fn after_arrival_is_delivered() {
        let (origin, dest, p) = setup();
        let snap = track(origin, dest, &p, at(9, 0)).unwrap();
        assert_eq!(snap.status, TrackingStatus::Delivered);
        assert_eq!(snap.progress, 1.0);
        assert_eq!(snap.position, dest);
        assert_eq!(snap.miles_remaining, 0);
        assert_eq!(snap.remaining_hours, 0.0);
    }
}
