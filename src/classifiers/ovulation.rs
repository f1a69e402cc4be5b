//! Ovulation status classification

use crate::error::ForecastError;
use crate::types::OvulationStatus;

/// Assumed ovulation day of a canonical cycle
pub const CANONICAL_OVULATION_DAY: i64 = 14;

/// Days-to-ovulation at or below which ovulation counts as approaching
const APPROACHING_WITHIN_DAYS: i64 = 3;

/// Classifies where the current day sits relative to ovulation
pub struct OvulationClassifier;

impl OvulationClassifier {
    /// Classify ovulation status.
    ///
    /// `days_to_ovulation = 14 - (day_offset % average_length_days)`, using the
    /// truncating remainder. The average length is the modulus and must be
    /// positive.
    pub fn classify(
        day_offset: i64,
        average_length_days: i64,
    ) -> Result<OvulationStatus, ForecastError> {
        if average_length_days <= 0 {
            return Err(ForecastError::InvalidCycleLength(average_length_days));
        }

        let days_to_ovulation = CANONICAL_OVULATION_DAY - (day_offset % average_length_days);

        let status = if days_to_ovulation > APPROACHING_WITHIN_DAYS {
            OvulationStatus::NotSoon
        } else if days_to_ovulation > 0 {
            OvulationStatus::Approaching
        } else if days_to_ovulation == 0 {
            OvulationStatus::Today
        } else {
            OvulationStatus::Passed
        };

        Ok(status)
    }
}
