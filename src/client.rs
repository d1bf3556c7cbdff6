use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::{HttpMethod, ReqwestTransport, Transport};
use crate::params::{normalize_date_params, Params};
use crate::request::SignedRequest;
use crate::response::{map_results, Results};
use crate::session::Session;

/// Client for the Withings API
///
/// The session is derived once, at construction, from the configured token
/// and secret. Changing them afterwards does not authenticate the client.
pub struct Client {
    config: ClientConfig,
    session: Option<Session>,
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Create a client using the blocking reqwest transport
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new()?.with_debug(config.debug);
        Ok(Client::with_transport(config, Arc::new(transport)))
    }

    /// Create a client with a custom transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        let session = Session::from_parts(config.token.as_deref(), config.secret.as_deref());
        Client {
            config,
            session,
            transport,
        }
    }

    /// Create a client by filling in a configuration in a callback
    ///
    /// ```no_run
    /// let client = withings::Client::configure(|config| {
    ///     config.consumer_key = Some("key".to_string());
    ///     config.consumer_secret = Some("secret".to_string());
    /// })?;
    /// # Ok::<(), withings::WithingsError>(())
    /// ```
    pub fn configure<F>(f: F) -> Result<Self>
    where
        F: FnOnce(&mut ClientConfig),
    {
        let mut config = ClientConfig::default();
        f(&mut config);
        Client::new(config)
    }

    /// Create a client from string options, see [`ClientConfig::from_map`]
    pub fn from_map<I, K, V>(options: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Client::new(ClientConfig::from_map(options))
    }

    /// Configuration the client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Mutable access to the configuration, e.g. to supply consumer
    /// credentials before the first call. The session is not re-derived.
    pub fn config_mut(&mut self) -> &mut ClientConfig {
        &mut self.config
    }

    /// Authenticated session, present when token and secret were both set at construction
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Whether requests are signed with a user session
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// User-Agent sent with every request
    pub fn user_agent(&self) -> &str {
        self.config.user_agent()
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Sign, send and map one API call
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `path` - API path, e.g. `/v2/measure`
    /// * `unwrap_key` - Response field holding the list of results, if any
    /// * `params` - Request parameters; date-bearing keys are normalized
    ///
    /// # Returns
    /// `Results::Single` without an unwrap key, `Results::Many` otherwise
    pub fn dispatch<T>(
        &self,
        method: HttpMethod,
        path: &str,
        unwrap_key: Option<&str>,
        params: Params,
    ) -> Result<Results<T>>
    where
        T: DeserializeOwned,
    {
        let consumer = self.config.consumer()?;
        let params = normalize_date_params(params);

        let request = SignedRequest::new(
            self.transport(),
            consumer,
            self.session(),
            &self.config.base_url,
        )
        .header("User-Agent", self.user_agent());

        let raw = request.send(method, path, &params)?;
        let results = map_results(raw, unwrap_key)?;

        debug!(
            %method,
            path,
            unwrap_key,
            count = results.len(),
            "withings dispatch"
        );

        Ok(results)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .field("session", &self.session)
            .finish()
    }
}
