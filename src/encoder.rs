//! Forecast encoding
//!
//! Renders predictions as JSON for transport. Field order and date formats are
//! fixed by the type definitions, so identical predictions always encode to
//! identical bytes.

use crate::error::ForecastError;
use crate::types::Prediction;
use serde::{Deserialize, Serialize};

/// JSON rendering style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    /// Single-line JSON
    Json,
    /// Indented JSON
    JsonPretty,
}

/// Encoder for prediction payloads
#[derive(Debug, Clone, Copy)]
pub struct ForecastEncoder {
    format: OutputFormat,
}

impl Default for ForecastEncoder {
    fn default() -> Self {
        Self::new(OutputFormat::Json)
    }
}

impl ForecastEncoder {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Encode a prediction to a JSON string (no trailing newline)
    pub fn encode(&self, prediction: &Prediction) -> Result<String, ForecastError> {
        let json = match self.format {
            OutputFormat::Json => serde_json::to_string(prediction)?,
            OutputFormat::JsonPretty => serde_json::to_string_pretty(prediction)?,
        };
        Ok(json)
    }

    /// Encode a prediction as one newline-terminated document
    pub fn encode_line(&self, prediction: &Prediction) -> Result<String, ForecastError> {
        Ok(self.encode(prediction)? + "\n")
    }
}
