//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - route inputs (`Coordinate`, `RouteEstimate`)
//! - carrier configuration (`CarrierMode`, `CarrierProfile`)
//! - predictor inputs and outputs (`EtaRequest`, `EtaFactor`, `EtaPrediction`, etc.)

pub mod types;

pub use types::*;
