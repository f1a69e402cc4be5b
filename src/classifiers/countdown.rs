//! Countdown to the next period

use crate::types::PeriodCountdown;

/// Remaining days at or below which the period counts as starting soon
const STARTING_SOON_WITHIN_DAYS: i64 = 3;

pub struct PeriodCountdownClassifier;

impl PeriodCountdownClassifier {
    pub fn classify(day_offset: i64, average_length_days: i64) -> PeriodCountdown {
        let days_remaining = average_length_days - day_offset;

        if days_remaining <= 0 {
            PeriodCountdown::Started
        } else if days_remaining <= STARTING_SOON_WITHIN_DAYS {
            PeriodCountdown::StartingSoon
        } else {
            PeriodCountdown::DaysUntil(days_remaining)
        }
    }
}
