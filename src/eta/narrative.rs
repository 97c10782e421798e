//! Human-readable explanation and recommendations for a prediction.
//!
//! Output here is display-only; nothing downstream parses it.

use crate::domain::{CarrierMode, EtaFactor, FactorImpact, RiskLevel, WeatherCondition};
use crate::eta::factors::{TRAFFIC_FACTOR, WEATHER_FACTOR};

/// Negative factors smaller than this are left out of the explanation.
const EXPLAIN_MIN_HOURS: f64 = 0.5;

/// Weather adjustments above this trigger a delay-pickup suggestion.
const WEATHER_DELAY_HOURS: f64 = 1.0;

pub const MAX_RECOMMENDATIONS: usize = 3;

const LTL_HISTORY: &str = "LTL shipments have historically seen more delays on this kind of lane \
because freight is consolidated and transferred between terminals.";
const OPTIMAL: &str = "Conditions look optimal for an on-time delivery.";

const UPGRADE_FROM_LTL: &str = "Consider upgrading to a full truckload (TL) for a more predictable transit.";
const OFF_PEAK_PICKUP: &str = "Schedule pickup during off-peak hours to reduce congestion delays.";
const ENABLE_TRACKING: &str = "Enable real-time tracking alerts to stay ahead of delays.";
const DELAY_FOR_WEATHER: &str = "Consider delaying pickup until the weather system clears the route.";
const SHIFT_PICKUP: &str = "Move pickup before 7 AM or after 7 PM to avoid rush hour traffic.";
const FAVORABLE: &str = "Conditions are favorable; no changes needed for this shipment.";

/// Build the "why this ETA" explanation.
pub fn explanation(mode: CarrierMode, factors: &[EtaFactor], weather: &[WeatherCondition]) -> String {
    let mut parts: Vec<String> = weather.iter().map(WeatherCondition::describe).collect();

    for f in factors {
        if f.impact == FactorImpact::Negative && f.adjustment_hours > EXPLAIN_MIN_HOURS {
            parts.push(format!(
                "{}: {} (+{:.1}h).",
                f.name, f.description, f.adjustment_hours
            ));
        }
    }

    if mode == CarrierMode::Ltl {
        parts.push(LTL_HISTORY.to_string());
    }

    if parts.is_empty() {
        return OPTIMAL.to_string();
    }
    parts.join(" ")
}

/// Up to three suggestions, risk-tier suggestions first.
pub fn recommendations(risk: RiskLevel, mode: CarrierMode, factors: &[EtaFactor]) -> Vec<String> {
    let mut out: Vec<&str> = Vec::new();

    match risk {
        RiskLevel::High => {
            if mode == CarrierMode::Ltl {
                out.push(UPGRADE_FROM_LTL);
            }
            out.push(OFF_PEAK_PICKUP);
            out.push(ENABLE_TRACKING);
        }
        RiskLevel::Medium => out.push(ENABLE_TRACKING),
        RiskLevel::Low => {}
    }

    let named = |name: &str| factors.iter().find(|f| f.name == name);

    if named(WEATHER_FACTOR).is_some_and(|f| f.adjustment_hours > WEATHER_DELAY_HOURS) {
        out.push(DELAY_FOR_WEATHER);
    }
    if named(TRAFFIC_FACTOR).is_some_and(|f| f.impact == FactorImpact::Negative) {
        out.push(SHIFT_PICKUP);
    }

    if out.is_empty() {
        out.push(FAVORABLE);
    }

    out.into_iter()
        .take(MAX_RECOMMENDATIONS)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Severity, WeatherKind};

    fn factor(name: &str, impact: FactorImpact, adjustment_hours: f64) -> EtaFactor {
        EtaFactor {
            name: name.to_string(),
            impact,
            description: format!("{name} effect"),
            adjustment_hours,
        }
    }

    #[test]
    fn quiet_conditions_read_as_optimal() {
        let text = explanation(CarrierMode::TlDry, &[], &[]);
        assert_eq!(text, OPTIMAL);
    }

    #[test]
    fn ltl_always_mentions_history() {
        let text = explanation(CarrierMode::Ltl, &[], &[]);
        assert!(text.contains("historically"));
        assert!(!text.contains(OPTIMAL));
    }

    #[test]
    fn small_negative_factors_are_not_explained() {
        let factors = vec![
            factor(TRAFFIC_FACTOR, FactorImpact::Negative, 0.4),
            factor("Day of Week", FactorImpact::Negative, 1.5),
        ];
        let text = explanation(CarrierMode::TlDry, &factors, &[]);
        assert!(!text.contains(TRAFFIC_FACTOR));
        assert!(text.contains("Day of Week effect (+1.5h)"));
    }

    #[test]
    fn weather_is_described_first() {
        let weather = vec![WeatherCondition::new(WeatherKind::Snow, Severity::Moderate, "I-90")];
        let text = explanation(CarrierMode::TlDry, &[], &weather);
        assert!(text.starts_with("Moderate snow expected along I-90."));
    }

    #[test]
    fn high_risk_ltl_is_truncated_to_three() {
        let factors = vec![
            factor(WEATHER_FACTOR, FactorImpact::Negative, 3.0),
            factor(TRAFFIC_FACTOR, FactorImpact::Negative, 3.5),
        ];
        let recs = recommendations(RiskLevel::High, CarrierMode::Ltl, &factors);
        assert_eq!(recs, vec![UPGRADE_FROM_LTL, OFF_PEAK_PICKUP, ENABLE_TRACKING]);
    }

    #[test]
    fn medium_risk_adds_factor_specific_suggestions() {
        let factors = vec![
            factor(TRAFFIC_FACTOR, FactorImpact::Negative, 2.5),
            factor(WEATHER_FACTOR, FactorImpact::Negative, 1.5),
        ];
        let recs = recommendations(RiskLevel::Medium, CarrierMode::TlDry, &factors);
        assert_eq!(recs, vec![ENABLE_TRACKING, DELAY_FOR_WEATHER, SHIFT_PICKUP]);
    }

    #[test]
    fn low_risk_without_issues_is_favorable() {
        let factors = vec![factor(TRAFFIC_FACTOR, FactorImpact::Neutral, 0.0)];
        let recs = recommendations(RiskLevel::Low, CarrierMode::TlDry, &factors);
        assert_eq!(recs, vec![FAVORABLE]);
    }
}
