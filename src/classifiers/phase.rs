//! Cycle phase classification
//!
//! Thresholds are fixed cycle days and do not scale with cycle length.

use crate::types::CyclePhase;

const MENSTRUATION_LAST_DAY: i64 = 5;
const FOLLICULAR_LAST_DAY: i64 = 13;
const OVULATION_WINDOW_LAST_DAY: i64 = 16;

pub struct PhaseClassifier;

impl PhaseClassifier {
    pub fn classify(day_offset: i64) -> CyclePhase {
        if day_offset <= MENSTRUATION_LAST_DAY {
            CyclePhase::Menstruation
        } else if day_offset <= FOLLICULAR_LAST_DAY {
            CyclePhase::Follicular
        } else if day_offset <= OVULATION_WINDOW_LAST_DAY {
            CyclePhase::OvulationWindow
        } else {
            CyclePhase::Luteal
        }
    }
}
