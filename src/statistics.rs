//! Cycle history statistics
//!
//! Reduces a history of recorded cycles to one representative cycle length and
//! picks the reference cycle every downstream calculation is anchored to.

use crate::types::{CycleRecord, MIN_RECORDS};

/// Representative figures for a cycle history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleSummary {
    /// Mean cycle length, rounded half away from zero
    pub average_length_days: i64,
    /// Last record in sequence order
    pub reference: CycleRecord,
}

/// Calculator for cycle history statistics
pub struct CycleStatisticsCalculator;

impl CycleStatisticsCalculator {
    /// Summarize a cycle history.
    ///
    /// Returns `None` when fewer than [`MIN_RECORDS`] records are supplied.
    /// The reference cycle is the last element of `records`: callers must pass
    /// records in chronological order, most recent last. Records are not
    /// re-sorted by date.
    pub fn summarize(records: &[CycleRecord]) -> Option<CycleSummary> {
        if records.len() < MIN_RECORDS {
            return None;
        }

        let reference = *records.last()?;
        let total: u64 = records.iter().map(|r| u64::from(r.duration_days)).sum();

        Some(CycleSummary {
            average_length_days: rounded_mean(total, records.len() as u64),
            reference,
        })
    }
}

/// Integer mean of non-negative values with halves rounded up (away from zero)
fn rounded_mean(total: u64, count: u64) -> i64 {
    ((2 * total + count) / (2 * count)) as i64
}
