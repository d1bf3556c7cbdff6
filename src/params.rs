use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::collections::BTreeMap;
use std::fmt;

/// Parameters passed to an endpoint, ordered by name so requests are reproducible.
pub type Params = BTreeMap<String, ParamValue>;

/// Keys the API expects as Unix epoch seconds
pub const EPOCH_DATE_KEYS: &[&str] = &["startdate", "enddate", "lastupdate"];

/// Keys the API expects as `YYYY-MM-DD` strings
pub const YMD_DATE_KEYS: &[&str] = &["startdateymd", "enddateymd", "date"];

const YMD_FORMAT: &str = "%Y-%m-%d";

/// A single request parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    Integer(i64),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
}

impl ParamValue {
    /// Encode the value as it is sent on the wire
    pub fn to_wire(&self) -> String {
        match self {
            ParamValue::Text(s) => s.clone(),
            ParamValue::Integer(n) => n.to_string(),
            ParamValue::Date(d) => d.format(YMD_FORMAT).to_string(),
            ParamValue::DateTime(dt) => dt.timestamp().to_string(),
        }
    }

    /// Get the value as a string slice if it is text
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if it is one
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParamValue::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire())
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        ParamValue::Integer(n)
    }
}

impl From<i32> for ParamValue {
    fn from(n: i32) -> Self {
        ParamValue::Integer(n.into())
    }
}

impl From<u32> for ParamValue {
    fn from(n: u32) -> Self {
        ParamValue::Integer(n.into())
    }
}

impl From<NaiveDate> for ParamValue {
    fn from(d: NaiveDate) -> Self {
        ParamValue::Date(d)
    }
}

impl From<DateTime<Utc>> for ParamValue {
    fn from(dt: DateTime<Utc>) -> Self {
        ParamValue::DateTime(dt)
    }
}

/// Rewrite date-bearing parameters into the form the API expects.
///
/// Epoch keys become Unix seconds, YMD keys become `YYYY-MM-DD` strings.
/// Other keys are left untouched. Applying it twice gives the same result.
pub fn normalize_date_params(params: Params) -> Params {
    params
        .into_iter()
        .map(|(key, value)| {
            let value = if EPOCH_DATE_KEYS.contains(&key.as_str()) {
                to_epoch(value)
            } else if YMD_DATE_KEYS.contains(&key.as_str()) {
                to_ymd(value)
            } else {
                value
            };
            (key, value)
        })
        .collect()
}

fn to_epoch(value: ParamValue) -> ParamValue {
    match value {
        ParamValue::Date(d) => match d.and_hms_opt(0, 0, 0) {
            Some(midnight) => ParamValue::Integer(Utc.from_utc_datetime(&midnight).timestamp()),
            None => ParamValue::Date(d),
        },
        ParamValue::DateTime(dt) => ParamValue::Integer(dt.timestamp()),
        ParamValue::Text(s) => {
            if let Ok(n) = s.parse::<i64>() {
                ParamValue::Integer(n)
            } else if let Ok(d) = NaiveDate::parse_from_str(&s, YMD_FORMAT) {
                to_epoch(ParamValue::Date(d))
            } else if let Ok(dt) = DateTime::parse_from_rfc3339(&s) {
                ParamValue::Integer(dt.timestamp())
            } else {
                ParamValue::Text(s)
            }
        }
        ParamValue::Integer(n) => ParamValue::Integer(n),
    }
}

fn to_ymd(value: ParamValue) -> ParamValue {
    match value {
        ParamValue::Date(d) => ParamValue::Text(d.format(YMD_FORMAT).to_string()),
        ParamValue::DateTime(dt) => ParamValue::Text(dt.format(YMD_FORMAT).to_string()),
        ParamValue::Integer(n) => match Utc.timestamp_opt(n, 0).single() {
            Some(dt) => ParamValue::Text(dt.format(YMD_FORMAT).to_string()),
            None => ParamValue::Integer(n),
        },
        ParamValue::Text(s) => ParamValue::Text(s),
    }
}

/// Merge caller options over fixed defaults; the caller wins on collisions.
pub fn merge(defaults: Params, overrides: Params) -> Params {
    let mut merged = defaults;
    merged.extend(overrides);
    merged
}

/// Encode parameters as wire pairs
pub fn to_pairs(params: &Params) -> Vec<(String, String)> {
    params
        .iter()
        .map(|(k, v)| (k.clone(), v.to_wire()))
        .collect()
}
