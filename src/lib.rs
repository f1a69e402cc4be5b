//! Cycle Forecast - On-device engine for menstrual cycle forecasts
//!
//! The engine turns an ordered history of recorded cycles into a forecast
//! through a deterministic pipeline: statistics → day offset → threshold
//! classifiers → aggregated prediction. The current date is always an explicit
//! input, so the same history and date always give the same forecast.
//!
//! ## Modules
//!
//! - **Engine**: `statistics`, `day_offset`, `classifiers`, `pipeline`
//! - **Boundary**: `schema` (input validation), `encoder` (JSON output), `ffi`
//! - **Ambient**: `config`, `logging`, `error`, `dates`

pub mod classifiers;
pub mod config;
pub mod dates;
pub mod day_offset;
pub mod encoder;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod schema;
pub mod statistics;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use config::Config;
pub use encoder::{ForecastEncoder, OutputFormat};
pub use error::ForecastError;
pub use pipeline::{predict, predict_json, Forecaster};

// Schema exports
pub use schema::{RawCycleRecord, RecordAdapter, SCHEMA_VERSION};

pub use types::{
    CyclePhase, CycleRecord, CycleStatistics, OvulationStatus, PeriodCountdown, Prediction,
    PredictionResult, PregnancyChance,
};

/// Library version
pub const FORECAST_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name reported by the CLI
pub const PRODUCER_NAME: &str = "cycle-forecast";
