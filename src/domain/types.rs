//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - passed between the distance estimator and the predictor
//! - exported to JSON/CSV
//! - attached to shipment records by callers for display

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{EtaError, ensure_finite};

/// A geographic point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting non-finite or out-of-range values.
    pub fn new(lat: f64, lng: f64) -> Result<Self, EtaError> {
        let lat = ensure_finite("latitude", lat)?;
        let lng = ensure_finite("longitude", lng)?;
        if !(-90.0..=90.0).contains(&lat) {
            return Err(EtaError::invalid_input(format!(
                "latitude {lat} outside [-90, 90]"
            )));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(EtaError::invalid_input(format!(
                "longitude {lng} outside [-180, 180]"
            )));
        }
        Ok(Self { lat, lng })
    }
}

impl FromStr for Coordinate {
    type Err = EtaError;

    /// Parse `"LAT,LNG"` (whitespace around either part is ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| EtaError::invalid_input(format!("expected LAT,LNG but got '{s}'")))?;
        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|e| EtaError::invalid_input(format!("bad latitude '{lat}': {e}")))?;
        let lng: f64 = lng
            .trim()
            .parse()
            .map_err(|e| EtaError::invalid_input(format!("bad longitude '{lng}': {e}")))?;
        Coordinate::new(lat, lng)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4},{:.4}", self.lat, self.lng)
    }
}

/// Ordered risk classification (`Low < Medium < High`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn display_name(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

/// Static per-mode parameters used by the predictor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarrierProfile {
    /// Transit-time multiplier relative to a direct dry-van truckload.
    pub multiplier: f64,
    pub base_risk: RiskLevel,
    /// Historical share of loads delivered late, in `[0, 1]`.
    pub delay_probability: f64,
}

/// Shipping service level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CarrierMode {
    /// Less-than-truckload (consolidated freight).
    Ltl,
    /// Full truckload, dry van.
    TlDry,
    Flatbed,
    /// Temperature-controlled truckload.
    Refrigerated,
}

impl CarrierMode {
    pub const ALL: [CarrierMode; 4] = [
        CarrierMode::Ltl,
        CarrierMode::TlDry,
        CarrierMode::Flatbed,
        CarrierMode::Refrigerated,
    ];

    /// Wire tag (`ltl`, `tl-dry`, ...).
    pub fn tag(self) -> &'static str {
        match self {
            CarrierMode::Ltl => "ltl",
            CarrierMode::TlDry => "tl-dry",
            CarrierMode::Flatbed => "flatbed",
            CarrierMode::Refrigerated => "refrigerated",
        }
    }

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            CarrierMode::Ltl => "LTL",
            CarrierMode::TlDry => "TL Dry Van",
            CarrierMode::Flatbed => "Flatbed",
            CarrierMode::Refrigerated => "Refrigerated",
        }
    }

    pub fn profile(self) -> CarrierProfile {
        match self {
            CarrierMode::Ltl => CarrierProfile {
                multiplier: 1.35,
                base_risk: RiskLevel::Medium,
                delay_probability: 0.25,
            },
            CarrierMode::TlDry => CarrierProfile {
                multiplier: 1.0,
                base_risk: RiskLevel::Low,
                delay_probability: 0.10,
            },
            CarrierMode::Flatbed => CarrierProfile {
                multiplier: 1.10,
                base_risk: RiskLevel::Medium,
                delay_probability: 0.15,
            },
            CarrierMode::Refrigerated => CarrierProfile {
                multiplier: 1.05,
                base_risk: RiskLevel::Low,
                delay_probability: 0.12,
            },
        }
    }
}

impl FromStr for CarrierMode {
    type Err = EtaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        CarrierMode::ALL
            .into_iter()
            .find(|mode| mode.tag().eq_ignore_ascii_case(tag))
            .ok_or_else(|| EtaError::InvalidCarrierMode(tag.to_string()))
    }
}

impl fmt::Display for CarrierMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherKind {
    Clear,
    Rain,
    Snow,
    Wind,
    Fog,
}

impl WeatherKind {
    pub fn display_name(self) -> &'static str {
        match self {
            WeatherKind::Clear => "clear skies",
            WeatherKind::Rain => "rain",
            WeatherKind::Snow => "snow",
            WeatherKind::Wind => "high winds",
            WeatherKind::Fog => "fog",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Light,
    Moderate,
    Severe,
}

impl Severity {
    pub fn display_name(self) -> &'static str {
        match self {
            Severity::Light => "Light",
            Severity::Moderate => "Moderate",
            Severity::Severe => "Severe",
        }
    }
}

/// A single weather observation/forecast affecting a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherCondition {
    pub condition: WeatherKind,
    pub severity: Severity,
    /// Free-text label for where the condition applies.
    pub location: String,
}

impl WeatherCondition {
    pub fn new(condition: WeatherKind, severity: Severity, location: impl Into<String>) -> Self {
        Self {
            condition,
            severity,
            location: location.into(),
        }
    }

    /// One-sentence description, e.g. "Moderate snow expected along northern route segments."
    pub fn describe(&self) -> String {
        format!(
            "{} {} expected along {}.",
            self.severity.display_name(),
            self.condition.display_name(),
            self.location
        )
    }
}

/// Direction of a factor's effect on transit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactorImpact {
    /// Shortens (or does not lengthen) the transit.
    Positive,
    /// Lengthens the transit.
    Negative,
    Neutral,
}

/// One contributing factor in an ETA breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtaFactor {
    pub name: String,
    pub impact: FactorImpact,
    pub description: String,
    /// Signed hours added to the base duration.
    pub adjustment_hours: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceWindow {
    pub earliest: NaiveDateTime,
    pub latest: NaiveDateTime,
}

/// Output of a single ETA computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtaPrediction {
    /// Departure the prediction was computed from.
    pub departure: NaiveDateTime,
    pub estimated_arrival: NaiveDateTime,
    pub duration_hours: f64,
    pub risk_level: RiskLevel,
    pub confidence_window: ConfidenceWindow,
    /// Always four entries: carrier, traffic, day of week, weather.
    pub factors: Vec<EtaFactor>,
    /// Conditions the weather factor was computed against (never `Clear`).
    pub weather: Vec<WeatherCondition>,
    pub explanation: String,
    /// At most three, highest priority first.
    pub recommendations: Vec<String>,
}

impl EtaPrediction {
    pub fn factor(&self, name: &str) -> Option<&EtaFactor> {
        self.factors.iter().find(|f| f.name == name)
    }
}

/// Inputs to the predictor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtaRequest {
    pub base_duration_hours: f64,
    pub carrier_mode: CarrierMode,
    pub origin_lat: f64,
    pub dest_lat: f64,
    /// Local wall-clock departure time at the origin.
    pub departure: NaiveDateTime,
}

/// Accepted layouts for departure timestamps (local wall-clock).
const DEPARTURE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Parse a departure like `2025-01-07T14:00`.
pub fn parse_departure(raw: &str) -> Result<NaiveDateTime, EtaError> {
    let raw = raw.trim();
    DEPARTURE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| {
            EtaError::invalid_input(format!(
                "bad departure '{raw}' (expected YYYY-MM-DDTHH:MM)"
            ))
        })
}

/// Distance/duration summary for a lane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteEstimate {
    pub distance_miles: u32,
    pub base_duration_hours: f64,
    /// Mandatory rest stops included in the base duration.
    pub rest_stops: u32,
}
