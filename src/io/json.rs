//! JSON output for single quotes.
//!
//! A quote document carries the request, the route estimate, and the full
//! prediction (factors, window, narrative) so a UI can render "Why this ETA?"
//! without recomputing anything.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, EtaPrediction, EtaRequest, RouteEstimate};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteDocument {
    pub tool: String,
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub route: RouteEstimate,
    pub request: EtaRequest,
    pub prediction: EtaPrediction,
}

impl QuoteDocument {
    pub fn new(
        origin: Coordinate,
        destination: Coordinate,
        route: RouteEstimate,
        request: EtaRequest,
        prediction: EtaPrediction,
    ) -> Self {
        Self {
            tool: "eta".to_string(),
            origin,
            destination,
            route,
            request,
            prediction,
        }
    }
}

pub fn quote_to_json(doc: &QuoteDocument) -> Result<String, AppError> {
    serde_json::to_string_pretty(doc)
        .map_err(|e| AppError::new(4, format!("Failed to serialize quote JSON: {e}")))
}

pub fn write_quote_json(path: &Path, doc: &QuoteDocument) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create quote JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, doc)
        .map_err(|e| AppError::new(2, format!("Failed to write quote JSON: {e}")))?;
    Ok(())
}
