//! Error types for Cycle Forecast

use thiserror::Error;

/// Errors that can occur while building a forecast.
///
/// Too few records is not an error; it is reported through
/// [`Prediction::InsufficientData`](crate::types::Prediction).
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Failed to parse cycle records: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid cycle duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid average cycle length: {0} (must be greater than zero)")]
    InvalidCycleLength(i64),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
