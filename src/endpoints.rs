//! Endpoint methods. Each one fixes the action parameters of a call and lets
//! caller options override them.

use crate::client::Client;
use crate::error::Result;
use crate::http::HttpMethod;
use crate::models::{Activity, MeasurementGroup, Notification, Response, SleepSeries, SleepSummary};
use crate::params::{merge, ParamValue, Params};

fn fixed(action: &str, user_id: Option<i64>) -> Params {
    let mut params = Params::new();
    params.insert("action".to_string(), ParamValue::from(action));
    if let Some(user_id) = user_id {
        params.insert("userid".to_string(), ParamValue::Integer(user_id));
    }
    params
}

impl Client {
    /// Daily activity aggregates
    ///
    /// Typical options: `startdateymd`, `enddateymd`, `date`, `lastupdate`.
    pub fn activities(&self, user_id: i64, options: Params) -> Result<Vec<Activity>> {
        let params = merge(fixed("getactivity", Some(user_id)), options);
        self.dispatch(HttpMethod::Get, "/v2/measure", Some("activities"), params)
            .map(|results| results.into_vec())
    }

    /// Body measurement groups (weight, fat mass, blood pressure, ...)
    ///
    /// Typical options: `startdate`, `enddate`, `lastupdate`, `meastype`, `category`.
    pub fn body_measurements(
        &self,
        user_id: i64,
        options: Params,
    ) -> Result<Vec<MeasurementGroup>> {
        let params = merge(fixed("getmeas", Some(user_id)), options);
        self.dispatch(HttpMethod::Get, "/measure", Some("measuregrps"), params)
            .map(|results| results.into_vec())
    }

    /// Sleep state segments between `startdate` and `enddate`
    pub fn sleep_series(&self, user_id: i64, options: Params) -> Result<Vec<SleepSeries>> {
        let params = merge(fixed("get", Some(user_id)), options);
        self.dispatch(HttpMethod::Get, "/v2/sleep", Some("series"), params)
            .map(|results| results.into_vec())
    }

    /// Nightly sleep summaries
    ///
    /// The API identifies the user from the access token here, so `user_id`
    /// is not sent.
    pub fn sleep_summary(&self, _user_id: i64, options: Params) -> Result<Vec<SleepSummary>> {
        let params = merge(fixed("getsummary", None), options);
        self.dispatch(HttpMethod::Get, "/v2/sleep", Some("series"), params)
            .map(|results| results.into_vec())
    }

    /// Subscribe a callback URL to notifications
    ///
    /// Expected options: `callbackurl`, `comment`, `appli`.
    ///
    /// The notification calls act on the user behind the access token and
    /// do not send `user_id`; pass `userid` in `options` if needed.
    pub fn create_notification(&self, _user_id: i64, options: Params) -> Result<Response> {
        let params = merge(fixed("subscribe", None), options);
        self.dispatch(HttpMethod::Post, "/notify", None, params)?
            .into_single()
    }

    /// Details of one subscription, selected by `callbackurl` (and `appli`)
    pub fn get_notification(&self, _user_id: i64, options: Params) -> Result<Notification> {
        let params = merge(fixed("get", None), options);
        self.dispatch(HttpMethod::Get, "/notify", None, params)?
            .into_single()
    }

    /// All subscriptions of a user, optionally filtered by `appli`
    pub fn list_notifications(&self, _user_id: i64, options: Params) -> Result<Vec<Notification>> {
        let params = merge(fixed("list", None), options);
        self.dispatch(HttpMethod::Get, "/notify", Some("profiles"), params)
            .map(|results| results.into_vec())
    }

    /// Remove a subscription, selected by `callbackurl` (and `appli`)
    pub fn revoke_notification(&self, _user_id: i64, options: Params) -> Result<Response> {
        let params = merge(fixed("revoke", None), options);
        self.dispatch(HttpMethod::Get, "/notify", None, params)?
            .into_single()
    }
}
