//! Adapter for turning exported cycle records into engine input
//!
//! Parsing and validation happen here, at the boundary, so the engine only
//! ever sees well-formed [`CycleRecord`]s.

use crate::error::ForecastError;
use crate::schema::raw_record::*;
use crate::types::CycleRecord;

/// Adapter for converting raw records to validated cycle records
pub struct RecordAdapter;

impl RecordAdapter {
    /// Parse a JSON string containing an array of records
    pub fn parse_array(json: &str) -> Result<Vec<RawCycleRecord>, ForecastError> {
        let records: Vec<RawCycleRecord> = serde_json::from_str(json)?;
        tracing::debug!(count = records.len(), "parsed cycle record array");
        Ok(records)
    }

    /// Parse NDJSON (newline-delimited JSON), one record per line
    pub fn parse_ndjson(ndjson: &str) -> Result<Vec<RawCycleRecord>, ForecastError> {
        let mut records = Vec::new();
        for (line_num, line) in ndjson.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<RawCycleRecord>(trimmed) {
                Ok(record) => records.push(record),
                Err(e) => {
                    return Err(ForecastError::ParseError(format!(
                        "Failed to parse line {}: {}",
                        line_num + 1,
                        e
                    )));
                }
            }
        }
        tracing::debug!(count = records.len(), "parsed cycle record lines");
        Ok(records)
    }

    /// Validate raw records, preserving their order.
    ///
    /// Fails on the first invalid record.
    pub fn to_records(raw: &[RawCycleRecord]) -> Result<Vec<CycleRecord>, ForecastError> {
        raw.iter()
            .enumerate()
            .map(|(index, record)| {
                record.validate().map_err(|e| match e {
                    ValidationError::InvalidStartDate { .. } => {
                        ForecastError::InvalidDate(format!("record {}: {}", index, e))
                    }
                    ValidationError::InvalidDuration { .. } => {
                        ForecastError::InvalidDuration(format!("record {}: {}", index, e))
                    }
                })
            })
            .collect()
    }

    /// Validate a batch of records, reporting every invalid one
    pub fn validate_records(raw: &[RawCycleRecord]) -> Vec<ValidationResult> {
        raw.iter()
            .enumerate()
            .filter_map(|(index, record)| {
                record.validate().err().map(|error| ValidationResult {
                    index,
                    start_date: record.start_date.clone(),
                    error,
                })
            })
            .collect()
    }
}

/// A record that failed validation
#[derive(Debug)]
pub struct ValidationResult {
    pub index: usize,
    pub start_date: String,
    pub error: ValidationError,
}
