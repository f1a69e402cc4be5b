//! Pipeline orchestration
//!
//! This module provides the public API for Cycle Forecast.
//! It runs the full pipeline from a cycle history to a forecast:
//! statistics → day offset → classifiers → aggregated prediction.

use crate::classifiers::{
    OvulationClassifier, PeriodCountdownClassifier, PhaseClassifier,
    PregnancyLikelihoodClassifier,
};
use crate::config::{Config, DEFAULT_HISTORY_LIMIT};
use crate::dates;
use crate::day_offset::DayOffsetCalculator;
use crate::encoder::{ForecastEncoder, OutputFormat};
use crate::error::ForecastError;
use crate::schema::{RawCycleRecord, RecordAdapter};
use crate::statistics::CycleStatisticsCalculator;
use crate::types::{CycleRecord, CycleStatistics, Prediction, PredictionResult, MIN_RECORDS};
use chrono::NaiveDate;

/// Build a forecast from a cycle history.
///
/// # Arguments
/// * `records` - Recorded cycles in chronological order, most recent last.
///   The last element is the reference cycle; records are not re-sorted.
/// * `today` - The date to forecast for. Never read from a clock here.
///
/// # Returns
/// `Prediction::InsufficientData` for fewer than three records, otherwise a
/// full `Prediction::Forecast`. Identical inputs always give identical output.
///
/// # Example
/// ```ignore
/// let prediction = predict(&records, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap())?;
/// ```
pub fn predict(records: &[CycleRecord], today: NaiveDate) -> Result<Prediction, ForecastError> {
    // Stage 1: Reduce the history to an average length and a reference cycle
    let summary = match CycleStatisticsCalculator::summarize(records) {
        Some(summary) => summary,
        None => return Ok(Prediction::InsufficientData),
    };

    let average_length_days = summary.average_length_days;
    let last_period_start_date = summary.reference.start_date;
    let next_period_date = dates::add_days(last_period_start_date, average_length_days)?;

    // Stage 2: Locate today within the reference cycle (computed once)
    let day_offset = DayOffsetCalculator::day_offset(last_period_start_date, today);

    // Stage 3: Classify
    let ovulation_status = OvulationClassifier::classify(day_offset, average_length_days)?;
    let pregnancy_chance = PregnancyLikelihoodClassifier::classify(day_offset, average_length_days);
    let days_before_period = PeriodCountdownClassifier::classify(day_offset, average_length_days);
    let current_phase = PhaseClassifier::classify(day_offset);

    // Stage 4: Aggregate
    Ok(Prediction::Forecast(PredictionResult {
        next_period_date,
        ovulation_status,
        pregnancy_chance,
        days_before_period,
        current_phase,
        cycle_statistics: CycleStatistics {
            average_length_days,
            last_period_start_date,
            next_predicted_date: next_period_date,
        },
    }))
}

/// Build a forecast from a JSON array of exported records.
///
/// # Arguments
/// * `records_json` - JSON array of `{ "startDate": ..., "duration": ... }`
/// * `today` - Current date as `YYYY-MM-DD`
///
/// # Returns
/// Compact JSON: either the forecast object or `{"status":"insufficient_data"}`.
/// A history shorter than three records is insufficient whatever it contains;
/// `today` is always validated.
pub fn predict_json(records_json: &str, today: &str) -> Result<String, ForecastError> {
    let today = dates::parse_date(today)?;
    Forecaster::with_history_limit(0).predict_json(records_json, today)
}

/// Most recent `limit` records by sequence position
fn most_recent<T>(records: &[T], limit: Option<usize>) -> &[T] {
    match limit {
        Some(limit) if records.len() > limit => &records[records.len() - limit..],
        _ => records,
    }
}

/// Configured forecaster that bounds how much history is considered.
///
/// Use this when records come straight from a store that may hold the whole
/// history: only the last `history_limit` records feed the forecast.
#[derive(Debug, Clone)]
pub struct Forecaster {
    history_limit: Option<usize>,
    encoder: ForecastEncoder,
}

impl Default for Forecaster {
    fn default() -> Self {
        Self::new()
    }
}

impl Forecaster {
    /// Create a forecaster with the default 12-cycle history limit
    pub fn new() -> Self {
        Self::with_history_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// Create a forecaster with a specific history limit (0 = unlimited)
    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            history_limit: (limit > 0).then_some(limit),
            encoder: ForecastEncoder::default(),
        }
    }

    /// Create a forecaster from loaded configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            history_limit: config.history_limit(),
            encoder: ForecastEncoder::new(config.output.format),
        }
    }

    /// Use a specific output format for JSON results
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.encoder = ForecastEncoder::new(format);
        self
    }

    pub fn history_limit(&self) -> Option<usize> {
        self.history_limit
    }

    /// Forecast from validated records
    pub fn predict(
        &self,
        records: &[CycleRecord],
        today: NaiveDate,
    ) -> Result<Prediction, ForecastError> {
        predict(most_recent(records, self.history_limit), today)
    }

    /// Forecast from raw exported records.
    ///
    /// Only records inside the history window are validated, and only once
    /// the window holds enough of them to forecast.
    pub fn predict_raw(
        &self,
        raw: &[RawCycleRecord],
        today: NaiveDate,
    ) -> Result<Prediction, ForecastError> {
        let window = most_recent(raw, self.history_limit);
        if window.len() < MIN_RECORDS {
            return Ok(Prediction::InsufficientData);
        }

        let records = RecordAdapter::to_records(window)?;
        predict(&records, today)
    }

    /// Forecast from a JSON array of raw records and encode the result
    pub fn predict_json(
        &self,
        records_json: &str,
        today: NaiveDate,
    ) -> Result<String, ForecastError> {
        let raw = RecordAdapter::parse_array(records_json)?;
        let prediction = self.predict_raw(&raw, today)?;
        self.encoder.encode(&prediction)
    }
}
