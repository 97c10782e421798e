//! Risk classification.

use crate::domain::{EtaFactor, FactorImpact, RiskLevel};

/// Summary of the factors that lengthen the transit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NegativeFactors {
    pub count: usize,
    pub total_hours: f64,
}

impl NegativeFactors {
    pub fn from_factors(factors: &[EtaFactor]) -> Self {
        factors
            .iter()
            .filter(|f| f.impact == FactorImpact::Negative)
            .fold(
                NegativeFactors {
                    count: 0,
                    total_hours: 0.0,
                },
                |acc, f| NegativeFactors {
                    count: acc.count + 1,
                    total_hours: acc.total_hours + f.adjustment_hours,
                },
            )
    }
}

/// Classify risk from the factor breakdown. First matching rule wins:
///
/// 1. `>= 3` negative factors, negative hours `> 4`, or weather on a carrier whose base risk is not low: **high**
/// 2. `>= 2` negative factors, negative hours `> 2`, or any weather: **medium**
/// 3. otherwise the carrier's own base risk
pub fn classify_risk(factors: &[EtaFactor], has_weather: bool, base_risk: RiskLevel) -> RiskLevel {
    let neg = NegativeFactors::from_factors(factors);

    if neg.count >= 3 || neg.total_hours > 4.0 || (has_weather && base_risk != RiskLevel::Low) {
        RiskLevel::High
    } else if neg.count >= 2 || neg.total_hours > 2.0 || has_weather {
        RiskLevel::Medium
    } else {
        base_risk
    }
}
