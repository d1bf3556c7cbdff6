use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Data category a notification subscription is about (`appli`)
#[non_exhaustive]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ApplicationType {
    Weight,
    BloodPressure,
    Activity,
    Sleep,
    UserActions,
    BedIn,
    BedOut,
}

impl ApplicationType {
    pub fn from_code(code: i64) -> Option<Self> {
        let appli = match code {
            1 => ApplicationType::Weight,
            4 => ApplicationType::BloodPressure,
            16 => ApplicationType::Activity,
            44 => ApplicationType::Sleep,
            46 => ApplicationType::UserActions,
            50 => ApplicationType::BedIn,
            51 => ApplicationType::BedOut,
            _ => return None,
        };
        Some(appli)
    }

    pub fn code(&self) -> i64 {
        match self {
            ApplicationType::Weight => 1,
            ApplicationType::BloodPressure => 4,
            ApplicationType::Activity => 16,
            ApplicationType::Sleep => 44,
            ApplicationType::UserActions => 46,
            ApplicationType::BedIn => 50,
            ApplicationType::BedOut => 51,
        }
    }
}

/// A webhook subscription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callbackurl: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub expires: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appli: Option<i64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Notification {
    pub fn application(&self) -> Option<ApplicationType> {
        self.appli.and_then(ApplicationType::from_code)
    }

    /// Whether the subscription has expired at the given instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires.map_or(false, |expires| expires <= now)
    }
}

/// Acknowledgement returned by calls that carry no data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Response {
    pub fn is_success(&self) -> bool {
        self.status.unwrap_or(0) == 0
    }
}
