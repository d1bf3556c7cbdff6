use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Sleep state reported for a series segment
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SleepState {
    Awake,
    LightSleep,
    DeepSleep,
    Rem,
}

impl SleepState {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(SleepState::Awake),
            1 => Some(SleepState::LightSleep),
            2 => Some(SleepState::DeepSleep),
            3 => Some(SleepState::Rem),
            _ => None,
        }
    }
}

/// One segment of a night, in a single sleep state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepSeries {
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub startdate: Option<DateTime<Utc>>,

    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub enddate: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<i64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SleepSeries {
    pub fn state(&self) -> Option<SleepState> {
        self.state.and_then(SleepState::from_code)
    }

    pub fn duration(&self) -> Option<Duration> {
        match (self.startdate, self.enddate) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }
}

/// Stage durations of a night, in seconds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SleepSummaryData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wakeupduration: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lightsleepduration: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deepsleepduration: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remsleepduration: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wakeupcount: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub durationtosleep: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub durationtowakeup: Option<i64>,
}

impl SleepSummaryData {
    /// Seconds spent asleep, across light, deep and REM stages
    pub fn total_sleep_seconds(&self) -> i64 {
        [
            self.lightsleepduration,
            self.deepsleepduration,
            self.remsleepduration,
        ]
        .iter()
        .flatten()
        .sum()
    }
}

/// Summary of one night
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    /// Device model that recorded the night
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<i64>,

    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub startdate: Option<DateTime<Utc>>,

    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub enddate: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub modified: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<SleepSummaryData>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
