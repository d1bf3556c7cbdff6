use std::sync::OnceLock;
use tracing::warn;

use crate::error::{Result, WithingsError};
use crate::oauth::Consumer;

/// Default API host
pub const DEFAULT_BASE_URL: &str = "https://wbsapi.withings.net";

/// Default host for the OAuth handshake endpoints
pub const DEFAULT_OAUTH_BASE_URL: &str = "https://oauth.withings.com/account";

/// Library version embedded in the default user agent
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configuration for the Withings client
#[derive(Clone)]
pub struct ClientConfig {
    /// Application key issued by Withings
    pub consumer_key: Option<String>,
    /// Application secret issued by Withings
    pub consumer_secret: Option<String>,
    /// User access token
    pub token: Option<String>,
    /// User access token secret
    pub secret: Option<String>,
    /// Explicit User-Agent; a default is derived when unset
    pub user_agent: Option<String>,
    /// API base URL
    pub base_url: String,
    /// OAuth handshake base URL
    pub oauth_base_url: String,
    /// Log every round trip at info level
    pub debug: bool,
    default_user_agent: OnceLock<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            consumer_key: None,
            consumer_secret: None,
            token: None,
            secret: None,
            user_agent: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            oauth_base_url: DEFAULT_OAUTH_BASE_URL.to_string(),
            debug: false,
            default_user_agent: OnceLock::new(),
        }
    }
}

impl ClientConfig {
    /// Create an empty configuration pointing at the production API
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from string options.
    ///
    /// Recognized keys: consumer_key, consumer_secret, token, secret,
    /// user_agent, base_url, oauth_base_url, debug. Other keys are ignored.
    pub fn from_map<I, K, V>(options: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut config = ClientConfig::default();
        for (key, value) in options {
            let value = value.into();
            match key.as_ref() {
                "consumer_key" => config.consumer_key = Some(value),
                "consumer_secret" => config.consumer_secret = Some(value),
                "token" => config.token = Some(value),
                "secret" => config.secret = Some(value),
                "user_agent" => config.user_agent = Some(value),
                "base_url" => config.base_url = value,
                "oauth_base_url" => config.oauth_base_url = value,
                "debug" => config.debug = matches!(value.as_str(), "1" | "true" | "yes"),
                other => warn!(option = other, "ignoring unrecognized client option"),
            }
        }
        config
    }

    /// Set the consumer key and secret
    pub fn with_consumer(mut self, key: impl Into<String>, secret: impl Into<String>) -> Self {
        self.consumer_key = Some(key.into());
        self.consumer_secret = Some(secret.into());
        self
    }

    /// Set the user access token and its secret
    pub fn with_token(mut self, token: impl Into<String>, secret: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self.secret = Some(secret.into());
        self
    }

    /// Set the User-Agent header value
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the OAuth handshake base URL
    pub fn with_oauth_base_url(mut self, oauth_base_url: impl Into<String>) -> Self {
        self.oauth_base_url = oauth_base_url.into();
        self
    }

    /// Set debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// User-Agent sent with every request
    pub fn user_agent(&self) -> &str {
        match self.user_agent {
            Some(ref user_agent) => user_agent,
            None => self
                .default_user_agent
                .get_or_init(|| format!("withings-rs/{}", VERSION)),
        }
    }

    /// Consumer credentials, checked on every call
    pub fn consumer(&self) -> Result<Consumer> {
        let key = non_empty(&self.consumer_key)
            .ok_or_else(|| WithingsError::ClientConfiguration("consumer_key is missing".to_string()))?;
        let secret = non_empty(&self.consumer_secret).ok_or_else(|| {
            WithingsError::ClientConfiguration("consumer_secret is missing".to_string())
        })?;
        Ok(Consumer::new(key, secret))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

// Implement Debug manually to avoid exposing the secrets
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redacted = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("ClientConfig")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &redacted(&self.consumer_secret))
            .field("token", &self.token)
            .field("secret", &redacted(&self.secret))
            .field("user_agent", &self.user_agent)
            .field("base_url", &self.base_url)
            .field("oauth_base_url", &self.oauth_base_url)
            .field("debug", &self.debug)
            .finish()
    }
}
