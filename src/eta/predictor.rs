//! ETA aggregation: factors -> total duration -> window -> risk -> narrative.

use chrono::{Duration, NaiveDateTime};
use log::{debug, warn};

use crate::config::EtaConfig;
use crate::domain::{ConfidenceWindow, EtaPrediction, EtaRequest, WeatherCondition, WeatherKind};
use crate::error::{EtaError, ensure_finite};
use crate::eta::factors::{carrier_factor, day_factor, traffic_factor, weather_factor};
use crate::eta::narrative::{explanation, recommendations};
use crate::eta::risk::classify_risk;
use crate::eta::weather::WeatherSource;

/// Predicts arrival times for a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct EtaPredictor {
    config: EtaConfig,
}

impl EtaPredictor {
    pub fn new(config: EtaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EtaConfig {
        &self.config
    }

    /// Deterministic prediction against an explicit list of weather conditions.
    pub fn calculate(
        &self,
        request: &EtaRequest,
        weather: &[WeatherCondition],
    ) -> Result<EtaPrediction, EtaError> {
        validate(request)?;

        // Clear skies are the absence of weather, not a condition.
        let weather: Vec<WeatherCondition> = weather
            .iter()
            .filter(|c| c.condition != WeatherKind::Clear)
            .cloned()
            .collect();

        let base = request.base_duration_hours;
        let profile = request.carrier_mode.profile();

        let factors = vec![
            carrier_factor(request.carrier_mode, base),
            traffic_factor(request.departure, base),
            day_factor(request.departure, base),
            weather_factor(&weather, base),
        ];

        let raw_total = base + factors.iter().map(|f| f.adjustment_hours).sum::<f64>();
        let floor = base * self.config.min_duration_ratio;
        let duration_hours = if raw_total < floor {
            debug!("clamping duration {raw_total:.2}h to floor {floor:.2}h");
            floor
        } else {
            raw_total
        };

        let variance_hours = duration_hours * (profile.delay_probability * 0.5);
        let estimated_arrival = add_hours(request.departure, duration_hours)?;
        let confidence_window = ConfidenceWindow {
            earliest: add_hours(estimated_arrival, -variance_hours)?,
            latest: add_hours(estimated_arrival, variance_hours)?,
        };

        let risk_level = classify_risk(&factors, !weather.is_empty(), profile.base_risk);
        let explanation = explanation(request.carrier_mode, &factors, &weather);
        let recommendations = recommendations(risk_level, request.carrier_mode, &factors);

        debug!(
            "eta {} base={base:.2}h total={duration_hours:.2}h risk={} weather={}",
            request.carrier_mode,
            risk_level.display_name(),
            weather.len()
        );

        Ok(EtaPrediction {
            departure: request.departure,
            estimated_arrival,
            duration_hours,
            risk_level,
            confidence_window,
            factors,
            weather,
            explanation,
            recommendations,
        })
    }

    /// Predict using weather from `source`, falling back to `fallback` when the
    /// source fails. Weather trouble never fails the prediction: if both fail
    /// the ETA is computed with no weather.
    pub fn predict(
        &self,
        request: &EtaRequest,
        source: &mut dyn WeatherSource,
        fallback: &mut dyn WeatherSource,
    ) -> Result<EtaPrediction, EtaError> {
        let weather = match source.conditions(request) {
            Ok(conditions) => conditions,
            Err(err) => {
                warn!("{} weather failed ({err}); using {}", source.name(), fallback.name());
                fallback.conditions(request).unwrap_or_else(|err| {
                    warn!("{} weather failed ({err}); assuming clear", fallback.name());
                    Vec::new()
                })
            }
        };
        self.calculate(request, &weather)
    }
}

/// Deterministic prediction with default configuration.
pub fn calculate_eta(
    request: &EtaRequest,
    weather: &[WeatherCondition],
) -> Result<EtaPrediction, EtaError> {
    EtaPredictor::default().calculate(request, weather)
}

fn validate(request: &EtaRequest) -> Result<(), EtaError> {
    let base = ensure_finite("base duration", request.base_duration_hours)?;
    if base < 0.0 {
        return Err(EtaError::invalid_input(format!(
            "base duration must be >= 0 (got {base})"
        )));
    }
    ensure_finite("origin latitude", request.origin_lat)?;
    ensure_finite("destination latitude", request.dest_lat)?;
    Ok(())
}

/// Shift a timestamp by fractional hours (millisecond resolution).
pub(crate) fn add_hours(at: NaiveDateTime, hours: f64) -> Result<NaiveDateTime, EtaError> {
    let millis = (hours * 3_600_000.0).round();
    if !millis.is_finite() || millis.abs() > i64::MAX as f64 {
        return Err(EtaError::invalid_input(format!("duration {hours}h out of range")));
    }
    at.checked_add_signed(Duration::milliseconds(millis as i64))
        .ok_or_else(|| EtaError::invalid_input(format!("{at} + {hours}h overflows the calendar")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CarrierMode, FactorImpact, RiskLevel, Severity, WeatherKind};
    use crate::eta::factors::{
        CARRIER_FACTOR, DAY_FACTOR, FACTOR_ORDER, TRAFFIC_FACTOR, WEATHER_FACTOR,
    };
    use crate::eta::weather::{FixedWeather, SimulatedWeather};
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn request(mode: CarrierMode, departure: NaiveDateTime) -> EtaRequest {
        EtaRequest {
            base_duration_hours: 10.0,
            carrier_mode: mode,
            origin_lat: 34.05,
            dest_lat: 40.71,
            departure,
        }
    }

    // 2025-01-07 is a Tuesday; 2025-01-10 is a Friday.
    fn tuesday_afternoon() -> NaiveDateTime {
        at(2025, 1, 7, 14, 0)
    }

    fn friday_evening() -> NaiveDateTime {
        at(2025, 1, 10, 17, 30)
    }

    struct FailingWeather;

    impl WeatherSource for FailingWeather {
        fn name(&self) -> &str {
            "failing"
        }

        fn conditions(&mut self, _request: &EtaRequest) -> Result<Vec<WeatherCondition>, EtaError> {
            Err(EtaError::WeatherUnavailable("feed offline".to_string()))
        }
    }

    #[test]
    fn tl_dry_tuesday_afternoon_is_baseline() {
        let p = calculate_eta(&request(CarrierMode::TlDry, tuesday_afternoon()), &[]).unwrap();
        for f in &p.factors {
            assert_eq!(f.adjustment_hours, 0.0, "{} should be 0", f.name);
        }
        assert_eq!(p.duration_hours, 10.0);
        assert_eq!(p.risk_level, RiskLevel::Low);
        assert_eq!(p.estimated_arrival, at(2025, 1, 8, 0, 0));
        // 10h * 0.10 * 0.5 = 0.5h either side.
        assert_eq!(p.confidence_window.earliest, at(2025, 1, 7, 23, 30));
        assert_eq!(p.confidence_window.latest, at(2025, 1, 8, 0, 30));
    }

    #[test]
    fn friday_evening_adds_traffic_and_day() {
        let p = calculate_eta(&request(CarrierMode::TlDry, friday_evening()), &[]).unwrap();
        let day = p.factor(DAY_FACTOR).unwrap();
        let traffic = p.factor(TRAFFIC_FACTOR).unwrap();
        assert!((day.adjustment_hours - 1.5).abs() < 1e-9);
        assert!((traffic.adjustment_hours - 3.5).abs() < 1e-9);
        assert!((p.duration_hours - 15.0).abs() < 1e-9);
        assert!(p.risk_level >= RiskLevel::Medium);
    }

    #[test]
    fn ltl_explains_history() {
        let p = calculate_eta(&request(CarrierMode::Ltl, tuesday_afternoon()), &[]).unwrap();
        let carrier = p.factor(CARRIER_FACTOR).unwrap();
        assert!((carrier.adjustment_hours - 3.5).abs() < 1e-9);
        assert_eq!(carrier.impact, FactorImpact::Negative);
        assert!(p.explanation.contains("LTL shipments have historically seen more delays"));
        assert_eq!(p.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn factors_are_always_in_fixed_order() {
        let p = calculate_eta(&request(CarrierMode::Flatbed, friday_evening()), &[]).unwrap();
        let names: Vec<&str> = p.factors.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, FACTOR_ORDER);
    }

    #[test]
    fn weather_escalates_risk() {
        let snow = vec![WeatherCondition::new(WeatherKind::Snow, Severity::Severe, "I-80")];
        let p = calculate_eta(&request(CarrierMode::TlDry, tuesday_afternoon()), &snow).unwrap();
        assert!((p.factor(WEATHER_FACTOR).unwrap().adjustment_hours - 5.0).abs() < 1e-9);
        assert_eq!(p.risk_level, RiskLevel::High);
        assert!(p.explanation.starts_with("Severe snow"));
        assert_eq!(p.weather, snow);

        let light_rain = vec![WeatherCondition::new(WeatherKind::Rain, Severity::Light, "I-5")];
        let p = calculate_eta(&request(CarrierMode::Refrigerated, tuesday_afternoon()), &light_rain)
            .unwrap();
        assert_eq!(p.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn morning_rush_alone_is_medium() {
        // 10h * 0.25 = 2.5h of traffic, the only delaying factor.
        let p = calculate_eta(&request(CarrierMode::TlDry, at(2025, 1, 7, 8, 0)), &[]).unwrap();
        assert!((p.factor(TRAFFIC_FACTOR).unwrap().adjustment_hours - 2.5).abs() < 1e-9);
        assert_eq!(p.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn clear_skies_do_not_count_as_weather() {
        let clear = vec![WeatherCondition::new(WeatherKind::Clear, Severity::Light, "I-40")];
        let p = calculate_eta(&request(CarrierMode::TlDry, tuesday_afternoon()), &clear).unwrap();
        assert_eq!(p.risk_level, RiskLevel::Low);
        assert!(p.weather.is_empty());
        assert!(!p.explanation.contains("clear skies"));
        assert_eq!(p.departure, tuesday_afternoon());
    }

    #[test]
    fn floor_clamps_total_duration() {
        let predictor = EtaPredictor::new(EtaConfig {
            min_duration_ratio: 0.8,
            ..EtaConfig::default()
        });
        // Sunday overnight: 10 - 1.5 - 1.0 = 7.5h, below the 8h floor.
        let p = predictor
            .calculate(&request(CarrierMode::TlDry, at(2025, 1, 12, 23, 0)), &[])
            .unwrap();
        assert!((p.duration_hours - 8.0).abs() < 1e-9);

        let p = calculate_eta(&request(CarrierMode::TlDry, at(2025, 1, 12, 23, 0)), &[]).unwrap();
        assert!((p.duration_hours - 7.5).abs() < 1e-9);
    }

    #[test]
    fn rejects_non_finite_and_negative_input() {
        let mut r = request(CarrierMode::TlDry, tuesday_afternoon());
        r.base_duration_hours = f64::NAN;
        assert!(matches!(calculate_eta(&r, &[]), Err(EtaError::InvalidInput(_))));
        r.base_duration_hours = -1.0;
        assert!(calculate_eta(&r, &[]).is_err());
        r.base_duration_hours = 10.0;
        r.dest_lat = f64::INFINITY;
        assert!(calculate_eta(&r, &[]).is_err());
    }

    #[test]
    fn failing_source_degrades_to_fallback() {
        let predictor = EtaPredictor::default();
        let r = request(CarrierMode::TlDry, tuesday_afternoon());
        let rain = vec![WeatherCondition::new(WeatherKind::Rain, Severity::Moderate, "I-10")];
        let p = predictor
            .predict(&r, &mut FailingWeather, &mut FixedWeather::new(rain.clone()))
            .unwrap();
        assert_eq!(p.weather, rain);

        let p = predictor
            .predict(&r, &mut FailingWeather, &mut FailingWeather)
            .unwrap();
        assert!(p.weather.is_empty());
        assert_eq!(p.duration_hours, 10.0);
    }

    #[test]
    fn seeded_predictions_repeat() {
        let predictor = EtaPredictor::default();
        let r = request(CarrierMode::Ltl, at(2025, 12, 3, 8, 0));
        let a = predictor
            .predict(&r, &mut SimulatedWeather::seeded(9), &mut FixedWeather::none())
            .unwrap();
        let b = predictor
            .predict(&r, &mut SimulatedWeather::seeded(9), &mut FixedWeather::none())
            .unwrap();
        assert_eq!(a, b);
    }

    fn any_mode() -> impl Strategy<Value = CarrierMode> {
        prop::sample::select(CarrierMode::ALL.to_vec())
    }

    fn any_weather() -> impl Strategy<Value = Vec<WeatherCondition>> {
        let kind = prop::sample::select(vec![
            WeatherKind::Clear,
            WeatherKind::Rain,
            WeatherKind::Snow,
            WeatherKind::Wind,
            WeatherKind::Fog,
        ]);
        let severity = prop::sample::select(vec![Severity::Light, Severity::Moderate, Severity::Severe]);
        prop::collection::vec(
            (kind, severity).prop_map(|(k, s)| WeatherCondition::new(k, s, "route")),
            0..4,
        )
    }

    proptest! {
        #[test]
        fn prediction_invariants_hold(
            base in 0.0f64..200.0,
            mode in any_mode(),
            day in 1u32..=28,
            hour in 0u32..24,
            weather in any_weather(),
        ) {
            let r = EtaRequest {
                base_duration_hours: base,
                carrier_mode: mode,
                origin_lat: 35.0,
                dest_lat: 42.0,
                departure: at(2025, 2, day, hour, 0),
            };
            let p = calculate_eta(&r, &weather).unwrap();
            prop_assert_eq!(p.factors.len(), 4);
            prop_assert!(p.recommendations.len() <= 3);
            prop_assert!(!p.recommendations.is_empty());
            prop_assert!(p.confidence_window.earliest <= p.estimated_arrival);
            prop_assert!(p.estimated_arrival <= p.confidence_window.latest);
            prop_assert!(p.duration_hours >= base * 0.5 - 1e-9);
            if mode == CarrierMode::TlDry {
                prop_assert_eq!(p.factors[0].adjustment_hours, 0.0);
            }
            let negatives = p.factors.iter().filter(|f| f.impact == FactorImpact::Negative).count();
            if negatives >= 3 {
                prop_assert_eq!(p.risk_level, RiskLevel::High);
            }
            if negatives == 0 {
                prop_assert!(p.risk_level >= mode.profile().base_risk);
            }
        }
    }
}
