use thiserror::Error;

/// Main error type for Withings API operations
#[derive(Debug, Error)]
pub enum WithingsError {
    /// Required client credentials are missing
    #[error("client configuration error: {0}")]
    ClientConfiguration(String),

    /// The API answered with a non-zero status in its response envelope
    #[error("Withings API error {status}: {message}")]
    Api { status: i64, message: String },

    /// HTTP transport error with a body that is not an API envelope
    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },

    /// The response did not have the expected shape, e.g. an unwrap key
    /// holding something other than a list of objects
    #[error("unexpected response at `{key}`: expected {expected}, found {found}")]
    UnexpectedResponse {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// OAuth handshake error
    #[error("OAuth error: {0}")]
    OAuth(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl WithingsError {
    /// Create an API error from an envelope status code
    pub fn from_status(status: i64) -> Self {
        WithingsError::Api {
            status,
            message: status_message(status).to_string(),
        }
    }

    /// Check if this error was raised because credentials are missing
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, WithingsError::ClientConfiguration(_))
    }

    /// Get the envelope status code if this is an API error
    pub fn api_status(&self) -> Option<i64> {
        match self {
            WithingsError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Get the HTTP status code if this is a transport error
    pub fn http_status(&self) -> Option<u16> {
        match self {
            WithingsError::Http { status, .. } => Some(*status),
            WithingsError::Reqwest(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Human readable description of a documented envelope status code
pub fn status_message(status: i64) -> &'static str {
    match status {
        100 => "the hash is missing, invalid, or does not match the provided email",
        247 => "the userid provided is absent, or incorrect",
        250 => "the provided userid and/or OAuth credentials do not match",
        286 => "no such subscription was found",
        293 => "the callback URL is either absent or incorrect",
        294 => "no such subscription could be deleted",
        304 => "the comment is either absent or incorrect",
        305 => "too many notifications are already set",
        342 => "the OAuth signature is invalid",
        343 => "wrong notification callback URL",
        601 => "too many requests",
        2554 => "wrong action or wrong webservice",
        2555 => "an unknown error occurred",
        2556 => "service is not defined",
        _ => "unknown status",
    }
}

/// Result type for Withings operations
pub type Result<T> = std::result::Result<T, WithingsError>;
