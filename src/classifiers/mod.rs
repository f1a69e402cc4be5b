//! Threshold classifiers
//!
//! Each classifier is a stateless function of the cycle day (and, where
//! needed, the average cycle length). They are independent of one another and
//! are combined by the pipeline into a single forecast.

mod countdown;
mod ovulation;
mod phase;
mod pregnancy;

pub use countdown::PeriodCountdownClassifier;
pub use ovulation::{OvulationClassifier, CANONICAL_OVULATION_DAY};
pub use phase::PhaseClassifier;
pub use pregnancy::PregnancyLikelihoodClassifier;
