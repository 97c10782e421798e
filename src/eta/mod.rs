//! ETA prediction.
//!
//! Delay is decomposed into independently explainable factors instead of a
//! single opaque estimate:
//!
//! - `factors`: carrier / time-of-day / day-of-week / weather multiplier tables
//! - `weather`: weather sources (simulated, fixed) behind the `WeatherSource` trait
//! - `risk`: low / medium / high classification from the factor breakdown
//! - `narrative`: explanation text and recommendations
//! - `predictor`: aggregation into an `EtaPrediction`

pub mod factors;
pub mod narrative;
pub mod predictor;
pub mod risk;
pub mod weather;

pub use predictor::{EtaPredictor, calculate_eta};
pub use weather::{FixedWeather, SimulatedWeather, WeatherSource, generate_weather};
