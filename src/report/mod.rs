//! Reporting utilities: batch summaries and formatted terminal output.

pub mod format;

pub use format::*;

use crate::batch::LaneQuote;
use crate::domain::RiskLevel;

/// Aggregate view of a batch run.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    pub lanes: usize,
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub mean_duration_hours: f64,
    /// Lane ids with the largest total delay over base, worst first.
    pub most_delayed: Vec<String>,
}

/// Summarize quotes; `top_n` bounds `most_delayed`.
pub fn summarize(quotes: &[LaneQuote], top_n: usize) -> BatchSummary {
    let count = |level: RiskLevel| {
        quotes
            .iter()
            .filter(|q| q.prediction.risk_level == level)
            .count()
    };

    let mean_duration_hours = if quotes.is_empty() {
        0.0
    } else {
        quotes.iter().map(|q| q.prediction.duration_hours).sum::<f64>() / quotes.len() as f64
    };

    let mut by_delay: Vec<(&str, f64)> = quotes
        .iter()
        .map(|q| {
            (
                q.lane.id.as_str(),
                q.prediction.duration_hours - q.route.base_duration_hours,
            )
        })
        .collect();
    by_delay.sort_by(|a, b| b.1.total_cmp(&a.1));

    BatchSummary {
        lanes: quotes.len(),
        low: count(RiskLevel::Low),
        medium: count(RiskLevel::Medium),
        high: count(RiskLevel::High),
        mean_duration_hours,
        most_delayed: by_delay
            .into_iter()
            .take(top_n)
            .map(|(id, _)| id.to_string())
            .collect(),
    }
}
