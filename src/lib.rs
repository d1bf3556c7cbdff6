//! # withings - Withings API client for Rust
//!
//! A blocking Rust client for the Withings activity, body measurement, sleep
//! and notification API. Requests are signed with OAuth 1.0a (HMAC-SHA1)
//! using the application's consumer credentials and, once the user has
//! granted access, their access token.
//!
//! ## Features
//!
//! - Typed endpoint methods for activities, measurements, sleep and webhooks
//! - OAuth 1.0a request signing and the full token handshake
//! - Date parameters accepted as `chrono` values and normalized for the API
//! - Typed models that keep unknown fields instead of failing
//! - Pluggable [`Transport`] for custom HTTP stacks and tests
//!
//! ## Basic Usage
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use withings::{Client, ClientConfig, Params};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new()
//!         .with_consumer("consumer_key", "consumer_secret")
//!         .with_token("access_token", "access_token_secret");
//!     let client = Client::new(config)?;
//!
//!     let mut options = Params::new();
//!     options.insert(
//!         "startdateymd".to_string(),
//!         NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().into(),
//!     );
//!     options.insert(
//!         "enddateymd".to_string(),
//!         NaiveDate::from_ymd_opt(2024, 1, 31).unwrap().into(),
//!     );
//!
//!     for activity in client.activities(12345, options)? {
//!         println!("{:?}: {:?} steps", activity.date, activity.steps);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Authorization
//!
//! A client configured with consumer credentials only can run the OAuth
//! handshake:
//!
//! ```no_run
//! use withings::{Client, ClientConfig};
//!
//! let client = Client::new(ClientConfig::new().with_consumer("key", "secret"))?;
//! let request_token = client.request_token("https://example.com/callback")?;
//! println!("Visit {}", client.authorize_url(&request_token)?);
//!
//! // After the user comes back with a verifier
//! let access = client.access_token(&request_token, Some("verifier"))?;
//! let client = Client::new(
//!     ClientConfig::new()
//!         .with_consumer("key", "secret")
//!         .with_token(access.token, access.secret),
//! )?;
//! # Ok::<(), withings::WithingsError>(())
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod models;
pub mod oauth;
pub mod params;
pub mod request;
pub mod response;
pub mod session;

// Re-export main types for convenience
pub use auth::{AccessToken, RequestToken};
pub use client::Client;
pub use config::ClientConfig;
pub use error::{Result, WithingsError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport};
pub use models::{
    Activity, ApplicationType, Measure, MeasureType, MeasurementGroup, Notification, Response,
    SleepSeries, SleepState, SleepSummary,
};
pub use oauth::Consumer;
pub use params::{normalize_date_params, ParamValue, Params};
pub use request::SignedRequest;
pub use response::Results;
pub use session::Session;
