use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Daily activity aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Day the aggregate covers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<u64>,

    /// Distance in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,

    /// Active calories burned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,

    /// Active plus passive calories burned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub totalcalories: Option<f64>,

    /// Elevation climbed in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,

    /// Seconds of soft activity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soft: Option<u64>,

    /// Seconds of moderate activity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moderate: Option<u64>,

    /// Seconds of intense activity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intense: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Activity {
    /// Total seconds spent in soft, moderate and intense activity
    pub fn active_seconds(&self) -> u64 {
        [self.soft, self.moderate, self.intense]
            .iter()
            .flatten()
            .sum()
    }
}
