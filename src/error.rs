//! Error types.
//!
//! - `EtaError` is returned by the library core (distance, prediction, tracking).
//! - `AppError` is the process-level error carrying an exit code for the `eta` binary.

/// Errors raised by the estimation core.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EtaError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("unknown carrier mode '{0}' (expected one of: ltl, tl-dry, flatbed, refrigerated)")]
    InvalidCarrierMode(String),
    #[error("weather data unavailable: {0}")]
    WeatherUnavailable(String),
}

impl EtaError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        EtaError::InvalidInput(message.into())
    }
}

/// Fail with `InvalidInput` unless `value` is finite.
pub(crate) fn ensure_finite(name: &str, value: f64) -> Result<f64, EtaError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EtaError::invalid_input(format!("{name} must be finite (got {value})")))
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<EtaError> for AppError {
    fn from(err: EtaError) -> Self {
        let exit_code = match err {
            EtaError::InvalidInput(_) | EtaError::InvalidCarrierMode(_) => 2,
            EtaError::WeatherUnavailable(_) => 4,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
