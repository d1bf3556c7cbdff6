use reqwest::blocking::{Client, ClientBuilder};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use url::Url;

use crate::error::Result;

/// Create the default HTTP client for API requests
/// with optimized settings for connection pooling and timeouts
pub fn create_http_client() -> Result<Client> {
    let client = ClientBuilder::new()
        .pool_max_idle_per_host(10)
        .timeout(Duration::from_secs(60))
        .connect_timeout(Duration::from_secs(10))
        .build()?;
    Ok(client)
}

/// HTTP methods used by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully signed request, ready to go on the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// Target URL, query string included
    pub url: Url,
    pub headers: Vec<(String, String)>,
    /// Form-encoded body for POST requests
    pub body: Option<String>,
}

impl HttpRequest {
    /// Get a header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Decoded query string and form body parameters
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = self.url.query_pairs().into_owned().collect();
        if let Some(ref body) = self.body {
            params.extend(url::form_urlencoded::parse(body.as_bytes()).into_owned());
        }
        params
    }

    /// Get a single decoded parameter by name
    pub fn param(&self, name: &str) -> Option<String> {
        self.params()
            .into_iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }
}

/// Raw HTTP response returned by a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, replacing invalid UTF-8
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}

/// Transport performs the network round trip of a signed request.
///
/// The default implementation is [`ReqwestTransport`]; tests substitute their own.
/// Errors are returned unchanged to the caller, there is no retry.
pub trait Transport: Send + Sync {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Blocking reqwest transport
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    debug: bool,
}

impl ReqwestTransport {
    /// Create a transport backed by the default HTTP client
    pub fn new() -> Result<Self> {
        Ok(ReqwestTransport::with_client(create_http_client()?))
    }

    /// Wrap an existing reqwest client
    pub fn with_client(client: Client) -> Self {
        ReqwestTransport {
            client,
            debug: false,
        }
    }

    /// Log every round trip at info level instead of debug
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        };

        let mut builder = self.client.request(method, request.url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(body);
        }

        let start = Instant::now();
        let http_response = builder.send()?;
        let status = http_response.status().as_u16();
        let body = http_response.bytes()?.to_vec();

        // The query carries the OAuth signature, keep it out of the logs
        let mut logged_url = request.url;
        logged_url.set_query(None);
        let elapsed = start.elapsed();
        if self.debug {
            info!(method = %request.method, url = %logged_url, status, ?elapsed, "withings request");
        } else {
            debug!(method = %request.method, url = %logged_url, status, ?elapsed, "withings request");
        }

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_method_as_str() {
        assert_eq!(HttpMethod::Get.as_str(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
    }

    #[test]
    fn test_request_params_merge_query_and_body() {
        let request = HttpRequest {
            method: HttpMethod::Post,
            url: Url::parse("https://wbsapi.withings.net/notify?oauth_nonce=abc").unwrap(),
            headers: vec![("User-Agent".to_string(), "test".to_string())],
            body: Some("action=subscribe&callbackurl=https%3A%2F%2Fexample.com%2Fhook".to_string()),
        };

        assert_eq!(request.param("oauth_nonce").as_deref(), Some("abc"));
        assert_eq!(request.param("action").as_deref(), Some("subscribe"));
        assert_eq!(
            request.param("callbackurl").as_deref(),
            Some("https://example.com/hook")
        );
        assert_eq!(request.header("user-agent"), Some("test"));
    }

    #[test]
    fn test_response_status() {
        let ok = HttpResponse { status: 200, body: b"{}".to_vec() };
        let err = HttpResponse { status: 503, body: b"down".to_vec() };
        assert!(ok.is_success());
        assert!(!err.is_success());
        assert_eq!(err.text(), "down");
    }
}
