//! Core types for the Cycle Forecast engine
//!
//! This module defines the records that flow into the engine and the forecast
//! that flows out. Status values are closed enums; each one serializes to its
//! canonical display text so the JSON shape stays stable for transport layers.

use chrono::NaiveDate;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Minimum number of recorded cycles required before forecasting
pub const MIN_RECORDS: usize = 3;

/// Status value reported when the history is too short
pub const INSUFFICIENT_DATA_STATUS: &str = "insufficient_data";

/// One observed menstrual cycle.
///
/// Records are supplied by an external store. The engine never creates,
/// mutates, or persists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleRecord {
    /// First day of the cycle
    pub start_date: NaiveDate,
    /// Length of the cycle in days (expected > 0)
    #[serde(alias = "duration")]
    pub duration_days: u32,
}

impl CycleRecord {
    pub fn new(start_date: NaiveDate, duration_days: u32) -> Self {
        Self {
            start_date,
            duration_days,
        }
    }
}

/// Ovulation status relative to the canonical day-14 ovulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OvulationStatus {
    #[serde(rename = "Ovulation not soon")]
    NotSoon,
    #[serde(rename = "Ovulation approaching")]
    Approaching,
    #[serde(rename = "Ovulating today")]
    Today,
    #[serde(rename = "Ovulation passed")]
    Passed,
}

impl OvulationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OvulationStatus::NotSoon => "Ovulation not soon",
            OvulationStatus::Approaching => "Ovulation approaching",
            OvulationStatus::Today => "Ovulating today",
            OvulationStatus::Passed => "Ovulation passed",
        }
    }
}

impl fmt::Display for OvulationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pregnancy likelihood for the current day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PregnancyChance {
    High,
    Low,
}

impl PregnancyChance {
    pub fn as_str(&self) -> &'static str {
        match self {
            PregnancyChance::High => "High",
            PregnancyChance::Low => "Low",
        }
    }
}

impl fmt::Display for PregnancyChance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cycle phase, derived from fixed day thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CyclePhase {
    #[serde(rename = "Menstruation")]
    Menstruation,
    #[serde(rename = "Follicular Phase")]
    Follicular,
    #[serde(rename = "Ovulation Window")]
    OvulationWindow,
    #[serde(rename = "Luteal Phase")]
    Luteal,
}

impl CyclePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            CyclePhase::Menstruation => "Menstruation",
            CyclePhase::Follicular => "Follicular Phase",
            CyclePhase::OvulationWindow => "Ovulation Window",
            CyclePhase::Luteal => "Luteal Phase",
        }
    }
}

impl fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Countdown to the next period.
///
/// Serialized as text: `"Period started"`, `"Period starting soon"`, or
/// `"<n> days until period"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum PeriodCountdown {
    Started,
    StartingSoon,
    DaysUntil(i64),
}

const PERIOD_STARTED: &str = "Period started";
const PERIOD_STARTING_SOON: &str = "Period starting soon";
const DAYS_UNTIL_SUFFIX: &str = " days until period";

impl fmt::Display for PeriodCountdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodCountdown::Started => f.write_str(PERIOD_STARTED),
            PeriodCountdown::StartingSoon => f.write_str(PERIOD_STARTING_SOON),
            PeriodCountdown::DaysUntil(days) => write!(f, "{days}{DAYS_UNTIL_SUFFIX}"),
        }
    }
}

impl From<PeriodCountdown> for String {
    fn from(countdown: PeriodCountdown) -> Self {
        countdown.to_string()
    }
}

impl TryFrom<String> for PeriodCountdown {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            PERIOD_STARTED => Ok(PeriodCountdown::Started),
            PERIOD_STARTING_SOON => Ok(PeriodCountdown::StartingSoon),
            other => other
                .strip_suffix(DAYS_UNTIL_SUFFIX)
                .and_then(|days| days.parse::<i64>().ok())
                .map(PeriodCountdown::DaysUntil)
                .ok_or_else(|| format!("unrecognized period countdown: {other}")),
        }
    }
}

/// Summary statistics reported alongside a forecast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleStatistics {
    /// Rounded mean cycle length (days)
    pub average_length_days: i64,
    /// Start date of the reference (last supplied) cycle
    pub last_period_start_date: NaiveDate,
    /// Always equal to `PredictionResult::next_period_date`
    pub next_predicted_date: NaiveDate,
}

/// Full forecast for one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub next_period_date: NaiveDate,
    pub ovulation_status: OvulationStatus,
    pub pregnancy_chance: PregnancyChance,
    pub days_before_period: PeriodCountdown,
    pub current_phase: CyclePhase,
    pub cycle_statistics: CycleStatistics,
}

/// Outcome of a prediction request.
///
/// Both variants are successful responses. `InsufficientData` serializes to
/// `{"status":"insufficient_data"}`; `Forecast` serializes to the bare
/// [`PredictionResult`] object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prediction {
    InsufficientData,
    Forecast(PredictionResult),
}

impl Prediction {
    pub fn is_insufficient(&self) -> bool {
        matches!(self, Prediction::InsufficientData)
    }

    pub fn forecast(&self) -> Option<&PredictionResult> {
        match self {
            Prediction::Forecast(result) => Some(result),
            Prediction::InsufficientData => None,
        }
    }
}

impl Serialize for Prediction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Prediction::Forecast(result) => result.serialize(serializer),
            Prediction::InsufficientData => {
                let mut state = serializer.serialize_struct("InsufficientData", 1)?;
                state.serialize_field("status", INSUFFICIENT_DATA_STATUS)?;
                state.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_cycle_record_accepts_duration_alias() {
        let record: CycleRecord =
            serde_json::from_str(r#"{"startDate":"2024-01-01","duration":28}"#).unwrap();
        assert_eq!(record, CycleRecord::new(date(2024, 1, 1), 28));

        let record: CycleRecord =
            serde_json::from_str(r#"{"startDate":"2024-01-01","durationDays":30}"#).unwrap();
        assert_eq!(record.duration_days, 30);
    }

    #[test]
    fn test_status_enums_serialize_to_display_text() {
        assert_eq!(
            serde_json::to_string(&OvulationStatus::Today).unwrap(),
            r#""Ovulating today""#
        );
        assert_eq!(
            serde_json::to_string(&CyclePhase::Follicular).unwrap(),
            r#""Follicular Phase""#
        );
        assert_eq!(
            serde_json::to_string(&PregnancyChance::High).unwrap(),
            r#""High""#
        );
        assert_eq!(OvulationStatus::Passed.to_string(), "Ovulation passed");
    }

    #[test]
    fn test_period_countdown_text() {
        assert_eq!(PeriodCountdown::Started.to_string(), "Period started");
        assert_eq!(PeriodCountdown::StartingSoon.to_string(), "Period starting soon");
        assert_eq!(PeriodCountdown::DaysUntil(5).to_string(), "5 days until period");

        let parsed: PeriodCountdown = serde_json::from_str(r#""16 days until period""#).unwrap();
        assert_eq!(parsed, PeriodCountdown::DaysUntil(16));
        assert!(serde_json::from_str::<PeriodCountdown>(r#""soon-ish""#).is_err());
    }

    #[test]
    fn test_insufficient_data_shape() {
        let json = serde_json::to_value(Prediction::InsufficientData).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "insufficient_data" }));
    }

    #[test]
    fn test_forecast_shape() {
        let result = PredictionResult {
            next_period_date: date(2024, 3, 27),
            ovulation_status: OvulationStatus::Approaching,
            pregnancy_chance: PregnancyChance::High,
            days_before_period: PeriodCountdown::DaysUntil(16),
            current_phase: CyclePhase::Follicular,
            cycle_statistics: CycleStatistics {
                average_length_days: 28,
                last_period_start_date: date(2024, 2, 28),
                next_predicted_date: date(2024, 3, 27),
            },
        };

        let json = serde_json::to_value(Prediction::Forecast(result)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "nextPeriodDate": "2024-03-27",
                "ovulationStatus": "Ovulation approaching",
                "pregnancyChance": "High",
                "daysBeforePeriod": "16 days until period",
                "currentPhase": "Follicular Phase",
                "cycleStatistics": {
                    "averageLengthDays": 28,
                    "lastPeriodStartDate": "2024-02-28",
                    "nextPredictedDate": "2024-03-27"
                }
            })
        );
    }
}
