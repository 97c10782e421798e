//! Input/output helpers.
//!
//! - CSV lane ingest + validation (`ingest`)
//! - batch result export to CSV (`export`)
//! - single-quote JSON output (`json`)

pub mod export;
pub mod ingest;
pub mod json;

pub use export::*;
pub use ingest::*;
pub use json::*;
