//! Export batch quotes to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::batch::LaneQuote;
use crate::domain::{CarrierMode, RiskLevel};
use crate::eta::factors::{CARRIER_FACTOR, DAY_FACTOR, TRAFFIC_FACTOR, WEATHER_FACTOR};
use crate::error::AppError;

/// One flattened CSV row per quoted lane.
#[derive(Debug, Clone, Serialize)]
struct QuoteRow<'a> {
    id: &'a str,
    carrier: CarrierMode,
    departure: NaiveDateTime,
    distance_miles: u32,
    base_hours: f64,
    carrier_hours: f64,
    traffic_hours: f64,
    day_hours: f64,
    weather_hours: f64,
    duration_hours: f64,
    estimated_arrival: NaiveDateTime,
    earliest: NaiveDateTime,
    latest: NaiveDateTime,
    risk: RiskLevel,
    weather_conditions: usize,
    top_recommendation: &'a str,
}

impl<'a> QuoteRow<'a> {
    fn from_quote(q: &'a LaneQuote) -> Self {
        let p = &q.prediction;
        let hours = |name: &str| p.factor(name).map(|f| f.adjustment_hours).unwrap_or(0.0);
        QuoteRow {
            id: &q.lane.id,
            carrier: q.lane.carrier_mode,
            departure: q.lane.departure,
            distance_miles: q.route.distance_miles,
            base_hours: round2(q.route.base_duration_hours),
            carrier_hours: round2(hours(CARRIER_FACTOR)),
            traffic_hours: round2(hours(TRAFFIC_FACTOR)),
            day_hours: round2(hours(DAY_FACTOR)),
            weather_hours: round2(hours(WEATHER_FACTOR)),
            duration_hours: round2(p.duration_hours),
            estimated_arrival: p.estimated_arrival,
            earliest: p.confidence_window.earliest,
            latest: p.confidence_window.latest,
            risk: p.risk_level,
            weather_conditions: p.weather.len(),
            top_recommendation: p.recommendations.first().map(String::as_str).unwrap_or(""),
        }
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Write quotes as CSV to any writer.
pub fn write_quotes_csv<W: Write>(out: W, quotes: &[LaneQuote]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(out);
    for q in quotes {
        writer
            .serialize(QuoteRow::from_quote(q))
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

/// Write quotes to a CSV file.
pub fn write_quotes_csv_file(path: &Path, quotes: &[LaneQuote]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_quotes_csv(file, quotes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::run_batch;
    use crate::config::EtaConfig;
    use crate::eta::EtaPredictor;
    use crate::io::ingest::read_lanes;

    const LANES: &str = "id,origin_lat,origin_lng,dest_lat,dest_lng,carrier,departure
LA-NY,34.05,-118.24,40.71,-74.01,tl-dry,2025-01-07T14:00
CHI-DAL,41.88,-87.63,32.78,-96.80,ltl,2025-01-10T17:30
";

    fn quotes() -> Vec<LaneQuote> {
        let lanes = read_lanes(LANES.as_bytes()).unwrap().lanes;
        let predictor = EtaPredictor::new(EtaConfig {
            simulate_weather: false,
            ..EtaConfig::default()
        });
        run_batch(&lanes, &predictor, 0).quotes
    }

    #[test]
    fn export_has_header_and_one_row_per_quote() {
        let mut buf = Vec::new();
        write_quotes_csv(&mut buf, &quotes()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("id,carrier,departure,distance_miles"));
        assert!(lines[1].starts_with("LA-NY,tl-dry,2025-01-07T14:00:00,"));
        assert!(lines[2].contains(",ltl,"));
    }

    #[test]
    fn export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.csv");
        write_quotes_csv_file(&path, &quotes()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("CHI-DAL"));
    }
}
