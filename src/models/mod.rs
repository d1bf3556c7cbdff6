//! Typed models for the objects returned by the API.
//!
//! Every model tolerates missing fields; anything the model does not name is
//! kept in its `extra` map.

mod activity;
mod measure;
mod notification;
mod sleep;

pub use activity::Activity;
pub use measure::{Measure, MeasureCategory, MeasureType, MeasurementGroup};
pub use notification::{ApplicationType, Notification, Response};
pub use sleep::{SleepState, SleepSeries, SleepSummary, SleepSummaryData};
