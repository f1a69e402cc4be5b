//! Raw cycle record as exported by the data store
//!
//! Dates arrive as strings and durations as plain integers. Nothing is
//! trusted until [`RawCycleRecord::validate`] has run.

use crate::dates;
use crate::types::CycleRecord;
use serde::{Deserialize, Serialize};

/// Input schema identifier
pub const SCHEMA_VERSION: &str = "cycle.record.v1";

/// Unvalidated cycle record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCycleRecord {
    /// First day of the cycle (`YYYY-MM-DD` or RFC 3339 timestamp)
    pub start_date: String,
    /// Cycle length in days
    #[serde(alias = "duration")]
    pub duration_days: i64,
}

impl RawCycleRecord {
    pub fn new(start_date: impl Into<String>, duration_days: i64) -> Self {
        Self {
            start_date: start_date.into(),
            duration_days,
        }
    }

    /// Validate into an engine-ready record
    pub fn validate(&self) -> Result<CycleRecord, ValidationError> {
        let start_date =
            dates::parse_date(&self.start_date).map_err(|_| ValidationError::InvalidStartDate {
                value: self.start_date.clone(),
            })?;

        let duration_days = u32::try_from(self.duration_days)
            .ok()
            .filter(|days| *days > 0)
            .ok_or(ValidationError::InvalidDuration {
                value: self.duration_days,
            })?;

        Ok(CycleRecord::new(start_date, duration_days))
    }
}

/// Validation errors for raw cycle records
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid start date: '{value}' is not a YYYY-MM-DD date or RFC 3339 timestamp")]
    InvalidStartDate { value: String },

    #[error("Invalid duration: {value} (must be a positive number of days)")]
    InvalidDuration { value: i64 },
}
