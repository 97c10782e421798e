//! Runtime configuration loaded from the environment (`.env` supported).
//!
//! | variable | meaning | default |
//! | - | - | - |
//! | `ETA_SEED` | seed for simulated weather | unset (OS entropy) |
//! | `ETA_MIN_DURATION_RATIO` | floor on total duration as a share of base | `0.5` |
//! | `ETA_SIMULATE_WEATHER` | draw simulated weather when no feed is wired | `true` |

use serde::{Deserialize, Serialize};

use crate::error::EtaError;

pub const DEFAULT_MIN_DURATION_RATIO: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtaConfig {
    pub seed: Option<u64>,
    /// Total duration is never allowed below `base * min_duration_ratio`.
    pub min_duration_ratio: f64,
    pub simulate_weather: bool,
}

impl Default for EtaConfig {
    fn default() -> Self {
        Self {
            seed: None,
            min_duration_ratio: DEFAULT_MIN_DURATION_RATIO,
            simulate_weather: true,
        }
    }
}

impl EtaConfig {
    /// Load from process environment after reading `.env` if present.
    pub fn from_env() -> Result<Self, EtaError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, EtaError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("ETA_SEED") {
            let seed = raw
                .trim()
                .parse::<u64>()
                .map_err(|e| EtaError::invalid_input(format!("ETA_SEED '{raw}': {e}")))?;
            config.seed = Some(seed);
        }

        if let Some(raw) = lookup("ETA_MIN_DURATION_RATIO") {
            let ratio = raw
                .trim()
                .parse::<f64>()
                .map_err(|e| EtaError::invalid_input(format!("ETA_MIN_DURATION_RATIO '{raw}': {e}")))?;
            if !(ratio.is_finite() && (0.0..=1.0).contains(&ratio)) {
                return Err(EtaError::invalid_input(format!(
                    "ETA_MIN_DURATION_RATIO must be within [0, 1] (got {ratio})"
                )));
            }
            config.min_duration_ratio = ratio;
        }

        if let Some(raw) = lookup("ETA_SIMULATE_WEATHER") {
            config.simulate_weather = parse_bool(&raw).ok_or_else(|| {
                EtaError::invalid_input(format!("ETA_SIMULATE_WEATHER '{raw}' is not a boolean"))
            })?;
        }

        Ok(config)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
