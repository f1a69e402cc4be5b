//! Pregnancy likelihood classification

use crate::types::PregnancyChance;

/// Fertile window opens this many days before the end of an average cycle
const FERTILE_WINDOW_START_OFFSET: i64 = 18;
/// Fertile window closes this many days before the end of an average cycle
const FERTILE_WINDOW_END_OFFSET: i64 = 11;

/// Classifies pregnancy likelihood from the fertile window
pub struct PregnancyLikelihoodClassifier;

impl PregnancyLikelihoodClassifier {
    /// Inclusive fertile window `[avg - 18, avg - 11]` in cycle days
    pub fn fertile_window(average_length_days: i64) -> (i64, i64) {
        (
            average_length_days - FERTILE_WINDOW_START_OFFSET,
            average_length_days - FERTILE_WINDOW_END_OFFSET,
        )
    }

    /// `High` inside the fertile window, `Low` everywhere else.
    ///
    /// No clamping is applied: for averages under 18 days the window simply
    /// starts before day 1.
    pub fn classify(day_offset: i64, average_length_days: i64) -> PregnancyChance {
        let (start, end) = Self::fertile_window(average_length_days);
        if (start..=end).contains(&day_offset) {
            PregnancyChance::High
        } else {
            PregnancyChance::Low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_for_28_day_cycle() {
        assert_eq!(PregnancyLikelihoodClassifier::fertile_window(28), (10, 17));

        assert_eq!(PregnancyLikelihoodClassifier::classify(9, 28), PregnancyChance::Low);
        assert_eq!(PregnancyLikelihoodClassifier::classify(10, 28), PregnancyChance::High);
        assert_eq!(PregnancyLikelihoodClassifier::classify(14, 28), PregnancyChance::High);
        assert_eq!(PregnancyLikelihoodClassifier::classify(17, 28), PregnancyChance::High);
        assert_eq!(PregnancyLikelihoodClassifier::classify(18, 28), PregnancyChance::Low);
    }

    #[test]
    fn test_window_tracks_cycle_length() {
        // 35-day cycle: window is days 17..=24
        assert_eq!(PregnancyLikelihoodClassifier::classify(16, 35), PregnancyChance::Low);
        assert_eq!(PregnancyLikelihoodClassifier::classify(17, 35), PregnancyChance::High);
        assert_eq!(PregnancyLikelihoodClassifier::classify(24, 35), PregnancyChance::High);
        assert_eq!(PregnancyLikelihoodClassifier::classify(25, 35), PregnancyChance::Low);
    }

    #[test]
    fn test_short_cycle_window_is_not_clamped() {
        // 15-day cycle: window is -3..=4
        assert_eq!(PregnancyLikelihoodClassifier::fertile_window(15), (-3, 4));
        assert_eq!(PregnancyLikelihoodClassifier::classify(1, 15), PregnancyChance::High);
        assert_eq!(PregnancyLikelihoodClassifier::classify(5, 15), PregnancyChance::Low);

        // 10-day cycle: window is -8..=-1, unreachable from day 1 onwards
        for day in 1..=40 {
            assert_eq!(PregnancyLikelihoodClassifier::classify(day, 10), PregnancyChance::Low);
        }
    }
}
