//! Position of the current date within the reference cycle

use crate::dates;
use chrono::NaiveDate;

/// Computes the 1-based cycle day for a given current date
pub struct DayOffsetCalculator;

impl DayOffsetCalculator {
    /// Day of the cycle that `today` falls on.
    ///
    /// Day 1 is `cycle_start` itself. The value is unbounded above (a late
    /// period keeps counting) and drops to zero or below when `today` precedes
    /// the cycle start. `today` is always supplied by the caller.
    pub fn day_offset(cycle_start: NaiveDate, today: NaiveDate) -> i64 {
        dates::days_between(cycle_start, today) + 1
    }
}
