//! Adjustment factor tables.
//!
//! Every factor is a rate applied to the *base* duration (never to the running
//! total) and expressed as a signed hour delta, so the aggregate does not
//! depend on the order factors are applied in.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

use crate::domain::{CarrierMode, EtaFactor, FactorImpact, Severity, WeatherCondition, WeatherKind};

pub const CARRIER_FACTOR: &str = "Carrier Mode";
pub const TRAFFIC_FACTOR: &str = "Traffic Conditions";
pub const DAY_FACTOR: &str = "Day of Week";
pub const WEATHER_FACTOR: &str = "Weather";

/// Factor names in the order they appear in every prediction.
pub const FACTOR_ORDER: [&str; 4] = [CARRIER_FACTOR, TRAFFIC_FACTOR, DAY_FACTOR, WEATHER_FACTOR];

/// Time-of-day congestion band for a departure hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrafficBand {
    /// 07:00–09:59
    MorningRush,
    /// 16:00–19:59
    EveningRush,
    /// 22:00–04:59
    Overnight,
    Normal,
}

impl TrafficBand {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            7..=9 => TrafficBand::MorningRush,
            16..=19 => TrafficBand::EveningRush,
            h if h >= 22 || h < 5 => TrafficBand::Overnight,
            _ => TrafficBand::Normal,
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            TrafficBand::MorningRush => 1.25,
            TrafficBand::EveningRush => 1.35,
            TrafficBand::Overnight => 0.85,
            TrafficBand::Normal => 1.0,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TrafficBand::MorningRush => "Morning rush hour congestion at pickup",
            TrafficBand::EveningRush => "Evening rush hour congestion at pickup",
            TrafficBand::Overnight => "Light overnight traffic",
            TrafficBand::Normal => "Normal traffic conditions",
        }
    }
}

/// Day-of-week freight volume multiplier.
pub fn day_multiplier(day: Weekday) -> f64 {
    match day {
        Weekday::Sun => 0.9,
        Weekday::Fri => 1.15,
        Weekday::Sat => 0.95,
        Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu => 1.0,
    }
}

fn day_description(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sunday departures see lighter freight traffic",
        Weekday::Fri => "Friday freight volume peaks ahead of the weekend",
        Weekday::Sat => "Saturday volume runs below weekday levels",
        Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu => "Normal weekday freight volume",
    }
}

/// Transit-time multiplier for one weather condition.
///
/// Wind and fog have no distinct "moderate" tier: moderate wind shares the
/// light value (1.1) and moderate fog shares the light value (1.05). Both are
/// pending product confirmation.
pub fn weather_multiplier(kind: WeatherKind, severity: Severity) -> f64 {
    match (kind, severity) {
        (WeatherKind::Clear, _) => 1.0,
        (WeatherKind::Snow, Severity::Light) => 1.15,
        (WeatherKind::Snow, Severity::Moderate) => 1.3,
        (WeatherKind::Snow, Severity::Severe) => 1.5,
        (WeatherKind::Rain, Severity::Light) => 1.05,
        (WeatherKind::Rain, Severity::Moderate) => 1.15,
        (WeatherKind::Rain, Severity::Severe) => 1.25,
        (WeatherKind::Wind, Severity::Light | Severity::Moderate) => 1.1,
        (WeatherKind::Wind, Severity::Severe) => 1.2,
        (WeatherKind::Fog, Severity::Light | Severity::Moderate) => 1.05,
        (WeatherKind::Fog, Severity::Severe) => 1.15,
    }
}

/// Worst single condition wins; conditions do not compound.
pub fn worst_weather_multiplier(conditions: &[WeatherCondition]) -> f64 {
    conditions
        .iter()
        .map(|c| weather_multiplier(c.condition, c.severity))
        .fold(1.0, f64::max)
}

/// Classify an adjustment by sign (exactly zero is neutral).
pub fn impact_for(adjustment_hours: f64) -> FactorImpact {
    if adjustment_hours > 0.0 {
        FactorImpact::Negative
    } else if adjustment_hours < 0.0 {
        FactorImpact::Positive
    } else {
        FactorImpact::Neutral
    }
}

fn adjustment(multiplier: f64, base_hours: f64) -> f64 {
    (multiplier - 1.0) * base_hours
}

pub fn carrier_factor(mode: CarrierMode, base_hours: f64) -> EtaFactor {
    let adjustment_hours = adjustment(mode.profile().multiplier, base_hours);
    // Carrier adjustments of exactly zero (TL dry van) count as positive, not neutral.
    let impact = if adjustment_hours > 0.0 {
        FactorImpact::Negative
    } else {
        FactorImpact::Positive
    };
    let description = if adjustment_hours > 0.0 {
        format!(
            "{} service adds handling time versus a direct truckload",
            mode.display_name()
        )
    } else {
        format!("{} moves direct with no added handling time", mode.display_name())
    };
    EtaFactor {
        name: CARRIER_FACTOR.to_string(),
        impact,
        description,
        adjustment_hours,
    }
}

pub fn traffic_factor(departure: NaiveDateTime, base_hours: f64) -> EtaFactor {
    let band = TrafficBand::from_hour(departure.hour());
    let adjustment_hours = adjustment(band.multiplier(), base_hours);
    EtaFactor {
        name: TRAFFIC_FACTOR.to_string(),
        impact: impact_for(adjustment_hours),
        description: band.description().to_string(),
        adjustment_hours,
    }
}

pub fn day_factor(departure: NaiveDateTime, base_hours: f64) -> EtaFactor {
    let day = departure.weekday();
    let adjustment_hours = adjustment(day_multiplier(day), base_hours);
    EtaFactor {
        name: DAY_FACTOR.to_string(),
        impact: impact_for(adjustment_hours),
        description: day_description(day).to_string(),
        adjustment_hours,
    }
}

pub fn weather_factor(conditions: &[WeatherCondition], base_hours: f64) -> EtaFactor {
    let worst = worst_weather_multiplier(conditions);
    let adjustment_hours = adjustment(worst, base_hours);
    let description = match conditions.len() {
        0 => "No significant weather expected on route".to_string(),
        1 => format!("1 weather condition on route (worst case {worst:.2}x)"),
        n => format!("{n} weather conditions on route (worst case {worst:.2}x)"),
    };
    EtaFactor {
        name: WEATHER_FACTOR.to_string(),
        impact: impact_for(adjustment_hours),
        description,
        adjustment_hours,
    }
}
