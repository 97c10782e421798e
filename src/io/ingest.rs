//! CSV lane ingest for batch quoting.
//!
//! Expected header (order-insensitive, case-insensitive):
//! `id, origin_lat, origin_lng, dest_lat, dest_lng, carrier, departure`
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - no prediction logic here

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use csv::StringRecord;

use crate::domain::{CarrierMode, Coordinate, parse_departure};
use crate::error::AppError;

const REQUIRED_COLUMNS: [&str; 7] = [
    "id",
    "origin_lat",
    "origin_lng",
    "dest_lat",
    "dest_lng",
    "carrier",
    "departure",
];

/// One shipment lane to quote.
#[derive(Debug, Clone, PartialEq)]
pub struct Lane {
    pub id: String,
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub carrier_mode: CarrierMode,
    pub departure: NaiveDateTime,
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub id: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct IngestedLanes {
    pub lanes: Vec<Lane>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Load lanes from a CSV file.
pub fn load_lanes(path: &Path) -> Result<IngestedLanes, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_lanes(file)
}

/// Load lanes from any CSV reader.
pub fn read_lanes<R: Read>(input: R) -> Result<IngestedLanes, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|c| !header_map.contains_key(*c))
        .collect();
    if !missing.is_empty() {
        return Err(AppError::new(
            2,
            format!("CSV is missing required column(s): {}", missing.join(", ")),
        ));
    }

    let mut lanes = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2: header is line 1 and records are 0-based.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    id: None,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        let id = field(&record, &header_map, "id").map(str::to_string);
        match parse_lane(&record, &header_map) {
            Ok(lane) => lanes.push(lane),
            Err(message) => row_errors.push(RowError { line, id, message }),
        }
    }

    if lanes.is_empty() {
        return Err(AppError::new(3, "No valid lanes in CSV."));
    }

    Ok(IngestedLanes {
        lanes,
        row_errors,
        rows_read,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a UTF-8 BOM.
    name.trim()
        .trim_start_matches('\u{feff}')
        .to_ascii_lowercase()
}

fn field<'a>(record: &'a StringRecord, header_map: &HashMap<String, usize>, name: &str) -> Option<&'a str> {
    header_map
        .get(name)
        .and_then(|&idx| record.get(idx))
        .filter(|v| !v.is_empty())
}

fn required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    field(record, header_map, name).ok_or_else(|| format!("missing {name}"))
}

fn parse_f64(record: &StringRecord, header_map: &HashMap<String, usize>, name: &str) -> Result<f64, String> {
    let raw = required(record, header_map, name)?;
    raw.parse::<f64>()
        .map_err(|e| format!("invalid {name} '{raw}': {e}"))
}

fn parse_lane(record: &StringRecord, header_map: &HashMap<String, usize>) -> Result<Lane, String> {
    let id = required(record, header_map, "id")?.to_string();

    let origin = Coordinate::new(
        parse_f64(record, header_map, "origin_lat")?,
        parse_f64(record, header_map, "origin_lng")?,
    )
    .map_err(|e| format!("origin: {e}"))?;
    let destination = Coordinate::new(
        parse_f64(record, header_map, "dest_lat")?,
        parse_f64(record, header_map, "dest_lng")?,
    )
    .map_err(|e| format!("destination: {e}"))?;

    let carrier_mode = required(record, header_map, "carrier")?
        .parse::<CarrierMode>()
        .map_err(|e| e.to_string())?;
    let departure = parse_departure(required(record, header_map, "departure")?).map_err(|e| e.to_string())?;

    Ok(Lane {
        id,
        origin,
        destination,
        carrier_mode,
        departure,
    })
}
