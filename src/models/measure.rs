use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Kind of physical measure, as encoded in the `type` field
#[non_exhaustive]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MeasureType {
    /// Weight in kg
    Weight,
    /// Height in meters
    Height,
    /// Fat free mass in kg
    FatFreeMass,
    /// Fat ratio in %
    FatRatio,
    /// Fat mass weight in kg
    FatMassWeight,
    /// Diastolic blood pressure in mmHg
    DiastolicBloodPressure,
    /// Systolic blood pressure in mmHg
    SystolicBloodPressure,
    /// Heart pulse in bpm
    HeartPulse,
    /// Temperature in celsius
    Temperature,
    /// SpO2 in %
    Spo2,
    /// Body temperature in celsius
    BodyTemperature,
    /// Skin temperature in celsius
    SkinTemperature,
    /// Muscle mass in kg
    MuscleMass,
    /// Hydration in kg
    Hydration,
    /// Bone mass in kg
    BoneMass,
    /// Pulse wave velocity in m/s
    PulseWaveVelocity,
}

impl MeasureType {
    /// Map an API type code to a measure type
    pub fn from_code(code: i64) -> Option<Self> {
        let kind = match code {
            1 => MeasureType::Weight,
            4 => MeasureType::Height,
            5 => MeasureType::FatFreeMass,
            6 => MeasureType::FatRatio,
            8 => MeasureType::FatMassWeight,
            9 => MeasureType::DiastolicBloodPressure,
            10 => MeasureType::SystolicBloodPressure,
            11 => MeasureType::HeartPulse,
            12 => MeasureType::Temperature,
            54 => MeasureType::Spo2,
            71 => MeasureType::BodyTemperature,
            73 => MeasureType::SkinTemperature,
            76 => MeasureType::MuscleMass,
            77 => MeasureType::Hydration,
            88 => MeasureType::BoneMass,
            91 => MeasureType::PulseWaveVelocity,
            _ => return None,
        };
        Some(kind)
    }

    /// API type code
    pub fn code(&self) -> i64 {
        match self {
            MeasureType::Weight => 1,
            MeasureType::Height => 4,
            MeasureType::FatFreeMass => 5,
            MeasureType::FatRatio => 6,
            MeasureType::FatMassWeight => 8,
            MeasureType::DiastolicBloodPressure => 9,
            MeasureType::SystolicBloodPressure => 10,
            MeasureType::HeartPulse => 11,
            MeasureType::Temperature => 12,
            MeasureType::Spo2 => 54,
            MeasureType::BodyTemperature => 71,
            MeasureType::SkinTemperature => 73,
            MeasureType::MuscleMass => 76,
            MeasureType::Hydration => 77,
            MeasureType::BoneMass => 88,
            MeasureType::PulseWaveVelocity => 91,
        }
    }
}

/// Whether a group holds real measurements or user objectives
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MeasureCategory {
    Real,
    Objective,
}

/// A single measure; its real value is `value * 10^unit`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    pub value: i64,
    #[serde(rename = "type")]
    pub kind: i64,
    pub unit: i32,
}

impl Measure {
    pub fn measure_type(&self) -> Option<MeasureType> {
        MeasureType::from_code(self.kind)
    }

    /// Value scaled by its unit exponent
    pub fn real_value(&self) -> f64 {
        self.value as f64 * 10f64.powi(self.unit)
    }
}

/// A group of measures taken together, e.g. one weigh-in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grpid: Option<i64>,

    /// How the group was captured (device, manual entry, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrib: Option<i64>,

    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<i64>,

    #[serde(default)]
    pub measures: Vec<Measure>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MeasurementGroup {
    pub fn category(&self) -> Option<MeasureCategory> {
        match self.category {
            Some(1) => Some(MeasureCategory::Real),
            Some(2) => Some(MeasureCategory::Objective),
            _ => None,
        }
    }

    /// Real value of the first measure of the given type
    pub fn value_of(&self, kind: MeasureType) -> Option<f64> {
        self.measures
            .iter()
            .find(|m| m.kind == kind.code())
            .map(Measure::real_value)
    }

    pub fn weight(&self) -> Option<f64> {
        self.value_of(MeasureType::Weight)
    }

    pub fn height(&self) -> Option<f64> {
        self.value_of(MeasureType::Height)
    }

    pub fn fat_free_mass(&self) -> Option<f64> {
        self.value_of(MeasureType::FatFreeMass)
    }

    pub fn fat_ratio(&self) -> Option<f64> {
        self.value_of(MeasureType::FatRatio)
    }

    pub fn fat_mass_weight(&self) -> Option<f64> {
        self.value_of(MeasureType::FatMassWeight)
    }

    pub fn diastolic_blood_pressure(&self) -> Option<f64> {
        self.value_of(MeasureType::DiastolicBloodPressure)
    }

    pub fn systolic_blood_pressure(&self) -> Option<f64> {
        self.value_of(MeasureType::SystolicBloodPressure)
    }

    pub fn heart_pulse(&self) -> Option<f64> {
        self.value_of(MeasureType::HeartPulse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const GROUP: &str = r#"{
        "grpid": 2909,
        "attrib": 0,
        "date": 1222930968,
        "category": 1,
        "measures": [
            {"value": 79300, "type": 1, "unit": -3},
            {"value": 652, "type": 5, "unit": -1},
            {"value": 178, "type": 4, "unit": -2}
        ]
    }"#;

    #[test]
    fn test_measurement_group_deserialization() {
        let group: MeasurementGroup = serde_json::from_str(GROUP).unwrap();
        assert_eq!(group.grpid, Some(2909));
        assert_eq!(group.date, Utc.timestamp_opt(1222930968, 0).single());
        assert_eq!(group.category(), Some(MeasureCategory::Real));
        assert_eq!(group.measures.len(), 3);
    }

    #[test]
    fn test_measurement_group_helpers() {
        let group: MeasurementGroup = serde_json::from_str(GROUP).unwrap();
        assert!((group.weight().unwrap() - 79.3).abs() < 1e-9);
        assert!((group.fat_free_mass().unwrap() - 65.2).abs() < 1e-9);
        assert!((group.height().unwrap() - 1.78).abs() < 1e-9);
        assert_eq!(group.heart_pulse(), None);
    }

    #[test]
    fn test_measure_type_codes() {
        for code in [1, 4, 5, 6, 8, 9, 10, 11, 12, 54, 71, 73, 76, 77, 88, 91] {
            let kind = MeasureType::from_code(code).unwrap();
            assert_eq!(kind.code(), code);
        }
        assert_eq!(MeasureType::from_code(2), None);
    }

    #[test]
    fn test_empty_group() {
        let group: MeasurementGroup = serde_json::from_str("{}").unwrap();
        assert!(group.measures.is_empty());
        assert_eq!(group.category(), None);
    }
}
